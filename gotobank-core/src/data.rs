use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Body of `POST /api/transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Recipient account.
    pub account_id: i64,
    pub amount: i64,
    pub description: String,
}

/// Body of `POST /api/payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Buyer account.
    pub account_id: i64,
    pub amount: i64,
    pub description: String,
}

/// Body of `POST /api/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub transaction_id: i64,
    pub code: i64,
}

/// Operations an operator can type into the interactive client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Account,
    Balance,
    Codes,
    Transaction,
    Transfer,
    Payment,
    Verify,
    Clear,
    Exit,
}

impl Operation {
    /// API route for operations that talk to the bank, `None` for local ones.
    pub fn route(&self) -> Option<&'static str> {
        use Operation::*;
        match self {
            Account => Some("account"),
            Balance => Some("balance"),
            Codes => Some("codes"),
            Transaction => Some("transaction"),
            Transfer => Some("transfer"),
            Payment => Some("payment"),
            Verify => Some("verify"),
            Clear | Exit => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Clear => "clear",
            Operation::Exit => "exit",
            op => op.route().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown operation `{0}`")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Operation::*;
        let op = match s {
            "account" => Account,
            "balance" => Balance,
            "codes" => Codes,
            "transaction" => Transaction,
            "transfer" => Transfer,
            "payment" => Payment,
            "verify" => Verify,
            "clear" | "cls" => Clear,
            "exit" => Exit,
            other => return Err(UnknownOperation(other.to_string())),
        };
        Ok(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
