/// Operator commands accepted on the chat channel. These are thin dispatches
/// onto the gateway bulk operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Echo the chat id so the operator can pin the bot to one channel.
    GetId,
    /// Cancel pending orders, optionally for a single symbol.
    CancelPending { symbol: Option<String> },
    /// Close open positions; `profit_filter` selects profitable-only (true)
    /// or losing-only (false).
    ClosePositions {
        symbol: Option<String>,
        profit_filter: Option<bool>,
    },
    /// Close positions and cancel pendings in one sweep.
    Kill { symbol: Option<String> },
}

/// Keywords that are command modifiers, never symbols.
const RESERVED: &[&str] = &["ALL", "PENDING", "ORDERS", "POSITIONS", "PROFIT", "LOSS"];

fn symbol_arg(args: &[&str], index: usize) -> Option<String> {
    args.get(index)
        .map(|a| a.trim().to_uppercase())
        .filter(|a| !a.is_empty() && !RESERVED.contains(&a.as_str()))
}

/// Recognize `/command [args]` text. Anything else returns `None` and falls
/// through to the signal grammars.
pub fn parse_command(text: &str) -> Option<Command> {
    let mut parts = text.split_whitespace();
    let head = parts.next()?;
    if !head.starts_with('/') {
        return None;
    }
    let cmd = head.to_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "/getid" => Some(Command::GetId),
        "/cancel" | "/cancelall" => Some(Command::CancelPending {
            symbol: symbol_arg(&args, 0),
        }),
        "/delete" => {
            // `/delete pending XAUUSD` and `/delete XAUUSD` are equivalent
            let start = usize::from(
                args.first()
                    .map(|a| {
                        let a = a.to_lowercase();
                        a == "pending" || a == "orders"
                    })
                    .unwrap_or(false),
            );
            Some(Command::CancelPending {
                symbol: symbol_arg(&args, start),
            })
        }
        "/close" | "/closeall" => {
            let profit_filter = match args.first().map(|a| a.to_lowercase()) {
                Some(a) if a == "profit" || a == "profits" => Some(true),
                Some(a) if a == "loss" || a == "losing" || a == "losses" => Some(false),
                _ => None,
            };
            Some(Command::ClosePositions {
                symbol: if profit_filter.is_some() {
                    None
                } else {
                    symbol_arg(&args, 0)
                },
                profit_filter,
            })
        }
        "/closeprofit" => Some(Command::ClosePositions {
            symbol: None,
            profit_filter: Some(true),
        }),
        "/closeloss" => Some(Command::ClosePositions {
            symbol: None,
            profit_filter: Some(false),
        }),
        "/kill" => Some(Command::Kill {
            symbol: symbol_arg(&args, 0),
        }),
        _ => None,
    }
}
