//! Interactive session.
//!
//! Reads commands line by line. Currency selections run in the background so
//! a newer selection can supersede one that is still waiting.

use std::sync::Arc;

use anyhow::Result;
use fx_core::{ConversionSession, ConversionState, Refresh};
use fx_types::{CurrencyCode, HttpTransport, NetworkMonitor};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  from <CODE>     select the currency to convert from
  to <CODE>       select the currency to convert to
  <AMOUNT>        set the amount (also: amount <AMOUNT>)
  list            show selectable currencies
  show            print the current conversion
  quit            leave";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    From(CurrencyCode),
    To(CurrencyCode),
    Amount(String),
    List,
    Show,
    Help,
    Quit,
}

/// Parses one input line. `Err` carries the message for the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let currency = |text: &str| text.parse::<CurrencyCode>().map_err(|e| e.to_string());

    match word.to_lowercase().as_str() {
        "from" => currency(rest).map(Command::From),
        "to" => currency(rest).map(Command::To),
        "amount" => Ok(Command::Amount(rest.to_string())),
        "list" => Ok(Command::List),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ if word.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-') => {
            Ok(Command::Amount(line.to_string()))
        }
        _ => Err(format!("Unknown command: {} (try 'help')", word)),
    }
}

/// Text of the conversion as the user sees it.
pub fn render(state: &ConversionState) -> String {
    let mut out = format!("{} {}\n", state.from(), state.amount_text());
    if let Some(line) = state.rate_line() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("{} {}", state.to(), state.converted_text()));
    out
}

pub fn print_catalog() {
    for code in CurrencyCode::all() {
        println!("{}", code.label());
    }
}

pub async fn run<T, M>(session: Arc<ConversionSession<T, M>>) -> Result<()>
where
    T: HttpTransport,
    M: NetworkMonitor,
{
    println!("{}", HELP);
    spawn_refresh(&session, |session| async move { session.start().await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::From(code)) => {
                spawn_refresh(&session, move |session| async move {
                    session.select_from(code).await
                });
            }
            Ok(Command::To(code)) => {
                spawn_refresh(&session, move |session| async move {
                    session.select_to(code).await
                });
            }
            Ok(Command::Amount(text)) => {
                println!("{}", render(&session.set_amount_text(&text)));
            }
            Ok(Command::List) => print_catalog(),
            Ok(Command::Show) => println!("{}", render(&session.snapshot())),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(message) => eprintln!("{}", message),
        }
    }
    Ok(())
}

fn spawn_refresh<T, M, F, Fut>(session: &Arc<ConversionSession<T, M>>, refresh: F)
where
    T: HttpTransport,
    M: NetworkMonitor,
    F: FnOnce(Arc<ConversionSession<T, M>>) -> Fut,
    Fut: std::future::Future<Output = Refresh> + Send + 'static,
{
    let fut = refresh(Arc::clone(session));
    let session = Arc::clone(session);
    tokio::spawn(async move {
        if let Refresh::Applied(_) = fut.await {
            println!("{}", render(&session.snapshot()));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_command("from eur"), Ok(Command::From(CurrencyCode::EUR)));
        assert_eq!(parse_command("  TO  gbp "), Ok(Command::To(CurrencyCode::GBP)));
        assert!(parse_command("from XXX").unwrap_err().contains("Unknown currency"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_command("12.5"), Ok(Command::Amount("12.5".into())));
        assert_eq!(parse_command("amount 7"), Ok(Command::Amount("7".into())));
        assert_eq!(parse_command("amount"), Ok(Command::Amount(String::new())));
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(parse_command("list"), Ok(Command::List));
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_render_before_rate() {
        let state = ConversionState::default();
        assert_eq!(render(&state), "NOK 100\nUSD 0.00");
    }

    #[test]
    fn test_render_with_rate() {
        let mut state = ConversionState::default();
        let pair = state.request();
        state.apply_rate(pair, dec!(0.0934), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());

        assert_eq!(
            render(&state),
            "NOK 100\n1 NOK = 0.0934 USD.\nUpdated Jan 1, 2026 23:59:59\nUSD 9.34"
        );
    }
}
