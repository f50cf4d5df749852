//! Interactive operator session.
//!
//! Reads an account token once, then reads operation names line by line and runs each one against
//! the bank. Input is trusted: numeric prompts fail the whole session on anything that is not a
//! whole number.
use crate::client::{ApiResponse, BankClient};
use crate::error::Error;
use gotobank_core::{ClientConfig, Operation, Payment, Transfer, Verification};
use std::io::{BufRead, Write};
use tokio::process::Command;
#[allow(unused_imports)]
use tracing::{debug, instrument, warn};

const TOKEN_PROMPT: &str = "Account token: ";
const OPERATION_PROMPT: &str = "Operation: ";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run a full session against `host` until `exit` or the first failure.
    #[instrument(name = "console", skip(self))]
    pub async fn run(&mut self, host: &str) -> Result<(), Error> {
        let token = self.prompt(TOKEN_PROMPT)?;
        let client = BankClient::new(&ClientConfig::new(&token).host(host))?;

        loop {
            let name = self.prompt(OPERATION_PROMPT)?;
            let op = match name.parse::<Operation>() {
                Ok(op) => op,
                Err(err) => {
                    debug!("{err}");
                    continue;
                }
            };

            if op == Operation::Exit {
                return Ok(());
            }
            if let Some(res) = self.execute(&client, op).await? {
                self.print(&res)?;
            }
        }
    }

    /// Run one operation. Local operations produce no response.
    async fn execute(
        &mut self,
        client: &BankClient,
        op: Operation,
    ) -> Result<Option<ApiResponse>, Error> {
        let res = match op {
            Operation::Account => client.account().await?,
            Operation::Balance => client.balance().await?,
            Operation::Codes => client.codes().await?,
            Operation::Transaction => {
                let id = self.prompt("Transaction ID: ")?;
                client.transaction(&id).await?
            }
            Operation::Transfer => {
                let transfer = Transfer {
                    account_id: self.prompt_number("Recipient ID: ")?,
                    amount: self.prompt_number("Amount: ")?,
                    description: self.prompt("Description: ")?,
                };
                client.transfer(&transfer).await?
            }
            Operation::Payment => {
                let payment = Payment {
                    account_id: self.prompt_number("Buyer ID: ")?,
                    amount: self.prompt_number("Amount: ")?,
                    description: self.prompt("Description: ")?,
                };
                client.payment(&payment).await?
            }
            Operation::Verify => {
                let verification = Verification {
                    transaction_id: self.prompt_number("Transaction ID: ")?,
                    code: self.prompt_number("Code: ")?,
                };
                client.verify(&verification).await?
            }
            Operation::Clear => {
                clear_screen().await;
                return Ok(None);
            }
            // Handled by the session loop.
            Operation::Exit => return Ok(None),
        };
        Ok(Some(res))
    }

    fn print(&mut self, res: &ApiResponse) -> Result<(), Error> {
        writeln!(self.output, "{}", res.status.as_u16())?;
        let body = res.json()?;
        writeln!(self.output, "{body}")?;
        Ok(())
    }

    /// Show `label` and read one line without its line ending.
    fn prompt(&mut self, label: &str) -> Result<String, Error> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(line)
    }

    fn prompt_number(&mut self, label: &str) -> Result<i64, Error> {
        let input = self.prompt(label)?;
        input
            .trim()
            .parse()
            .map_err(|source| Error::InvalidNumber { input, source })
    }
}

/// Clear the terminal with the platform's own command. Failures are ignored.
async fn clear_screen() {
    let status = if cfg!(windows) {
        Command::new("cmd").args(["/C", "cls"]).status().await
    } else {
        Command::new("clear").status().await
    };

    if let Err(err) = status {
        warn!("Could not clear the terminal: {err}");
    }
}
