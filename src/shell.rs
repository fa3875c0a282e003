//! Interactive operator shell
//!
//! Reads menu choices and arguments line by line, calls the registry and
//! prints the records it returns. Invalid input and registry errors are
//! reported and the loop continues; end of input ends the session.

use booth_core::{
    config::OutputFormat,
    models::{CallCategory, CallOutcome},
    traits::DurationSource,
    AppError, AppResult,
};
use booth_services::BoothRegistry;
use serde::Serialize;
use std::fmt::Display;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const MENU: &str = "\n\
1. Register call\n\
2. Booth information\n\
3. Consolidated total\n\
4. Reset booth\n\
5. Available booths\n\
6. Exit";

pub struct Shell<R, W> {
    registry: BoothRegistry,
    source: Box<dyn DurationSource + Send>,
    output: OutputFormat,
    input: R,
    out: W,
    closed: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        registry: BoothRegistry,
        source: Box<dyn DurationSource + Send>,
        output: OutputFormat,
        input: R,
        out: W,
    ) -> Self {
        Self {
            registry,
            source,
            output,
            input,
            out,
            closed: false,
        }
    }

    /// Run the menu loop until the operator exits or input ends
    pub fn run(&mut self) -> AppResult<()> {
        while !self.closed {
            writeln!(self.out, "{}", MENU)?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };

            let result = match choice.as_str() {
                "1" => self.register_call(),
                "2" => self.booth_info(),
                "3" => self.consolidated_total(),
                "4" => self.reset_booth(),
                "5" => self.available_booths(),
                "6" => break,
                other => {
                    debug!("Unknown menu option: {:?}", other);
                    writeln!(self.out, "Invalid option")?;
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(err) if err.is_client_error() => {
                    warn!(code = err.error_code(), "{}", err);
                    writeln!(self.out, "Error: {}", err)?;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn registry(&self) -> &BoothRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Print a label and read one trimmed line; `None` once input is exhausted
    fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_booth_number(&mut self, label: &str) -> AppResult<Option<u32>> {
        let Some(text) = self.prompt(label)? else {
            return Ok(None);
        };
        match text.parse::<u32>() {
            Ok(number) if number > 0 => Ok(Some(number)),
            _ => Err(AppError::invalid(format!("invalid booth number: {:?}", text))),
        }
    }

    fn emit<T: Serialize + Display>(&mut self, record: &T) -> AppResult<()> {
        match self.output {
            OutputFormat::Text => writeln!(self.out, "{}", record)?,
            OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string(record)?)?,
        }
        Ok(())
    }

    fn print_busy(&mut self, number: u32) -> AppResult<()> {
        writeln!(self.out, "Booth {} is occupied.", number)?;
        writeln!(self.out, "A new call cannot be registered on this booth.")?;
        Ok(())
    }

    fn register_call(&mut self) -> AppResult<()> {
        let Some(number) = self.prompt_booth_number("Booth number: ")? else {
            return Ok(());
        };

        if !self.registry.contains(number) {
            writeln!(self.out, "Booth {} does not exist. Creating booth...", number)?;
            self.registry.create_booth(number)?;
        }

        // Busy booths are reported before the category prompt
        if self
            .registry
            .find_booth(number)
            .map_or(false, |booth| booth.is_occupied())
        {
            return self.print_busy(number);
        }

        let Some(text) = self.prompt("Call type (LOCAL, LONG_DISTANCE, MOBILE): ")? else {
            return Ok(());
        };
        let category: CallCategory = text.parse()?;

        match self
            .registry
            .register_call(number, category, self.source.as_mut())?
        {
            CallOutcome::Registered { call } => match self.output {
                OutputFormat::Text => writeln!(
                    self.out,
                    "Call registered: {} for {} minutes, {} cost units",
                    call.category(),
                    call.duration_minutes(),
                    call.cost()
                )?,
                OutputFormat::Json => writeln!(
                    self.out,
                    "{}",
                    serde_json::to_string(&CallOutcome::Registered { call })?
                )?,
            },
            CallOutcome::Busy => self.print_busy(number)?,
        }
        Ok(())
    }

    fn booth_info(&mut self) -> AppResult<()> {
        let Some(number) = self.prompt_booth_number("Booth number: ")? else {
            return Ok(());
        };
        let info = self.registry.booth_info(number)?;
        self.emit(&info)
    }

    fn consolidated_total(&mut self) -> AppResult<()> {
        let total = self.registry.consolidated_total()?;
        self.emit(&total)
    }

    fn reset_booth(&mut self) -> AppResult<()> {
        let Some(number) = self.prompt_booth_number("Booth number to reset: ")? else {
            return Ok(());
        };
        self.registry.reset_booth(number)?;
        writeln!(self.out, "Booth {} reset", number)?;
        Ok(())
    }

    fn available_booths(&mut self) -> AppResult<()> {
        let numbers: Vec<u32> = self
            .registry
            .available_booths()
            .iter()
            .map(|booth| booth.number())
            .collect();

        match self.output {
            OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string(&numbers)?)?,
            OutputFormat::Text if numbers.is_empty() => {
                writeln!(self.out, "No booths available")?
            }
            OutputFormat::Text => {
                let list: Vec<String> = numbers.iter().map(u32::to_string).collect();
                writeln!(self.out, "Available booths: {}", list.join(", "))?
            }
        }
        Ok(())
    }
}
