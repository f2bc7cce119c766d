//! Interactive console loop: prompt for a selection, print the statistics,
//! page through raw rows, offer a restart.

pub mod pager;
pub mod validate;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, error};

use crate::data::filter::FilterSelection;
use crate::state::{Session, PAGE_SIZE};
use validate::{validate_city, validate_month, validate_weekday, validate_yes_no, InvalidInput};

const RULE: &str = "----------------------------------------";

pub struct Shell<R, W> {
    input: R,
    out: W,
    data_dir: PathBuf,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, data_dir: PathBuf) -> Self {
        Self {
            input,
            out,
            data_dir,
        }
    }

    /// Run cycles until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(selection) = self.get_filters()? else {
                break;
            };

            match Session::load(&self.data_dir, selection) {
                Ok(mut session) => {
                    session
                        .report()
                        .render_text(&mut self.out)
                        .context("writing statistics")?;
                    if !self.display_raw(&mut session)? {
                        break;
                    }
                }
                Err(e) => {
                    error!("{e}");
                    writeln!(self.out, "\nCould not load {} data: {e}", selection.city)?;
                }
            }

            let restart = self.read_line("\nWould you like to restart? Enter yes or no.\n")?;
            if !restart.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes")) {
                break;
            }
        }
        Ok(())
    }

    /// Ask for city, month and weekday. `None` when input ends.
    fn get_filters(&mut self) -> Result<Option<FilterSelection>> {
        writeln!(self.out, "Hello! Let's explore some US bikeshare data!")?;

        let Some(city) = self.ask(
            "Which city would you like to explore? (Chicago, Washington or New York City)\n",
            validate_city,
        )?
        else {
            return Ok(None);
        };
        let Some(month) = self.ask(
            "Would you like to explore a certain month from Jan-Jun? Type 'all' for all months\n",
            validate_month,
        )?
        else {
            return Ok(None);
        };
        let Some(weekday) = self.ask(
            "Would you like to explore a certain weekday? Type 'all' for all days\n",
            validate_weekday,
        )?
        else {
            return Ok(None);
        };

        writeln!(self.out, "{RULE}")?;
        Ok(Some(FilterSelection {
            city,
            month,
            weekday,
        }))
    }

    /// Offer raw rows page by page. Returns `false` when input ended.
    fn display_raw(&mut self, session: &mut Session) -> Result<bool> {
        let first = format!("Do you want to see {PAGE_SIZE} lines of raw data? Enter yes or no.\n");
        let more = format!("Do you want to see {PAGE_SIZE} more lines of raw data? Enter yes or no.\n");

        match self.ask(&first, validate_yes_no)? {
            None => return Ok(false),
            Some(false) => return Ok(true),
            Some(true) => {}
        }

        let demographics = session.table.has_demographics;
        loop {
            let page = session.next_page();
            if page.is_empty() {
                writeln!(self.out, "\nNo more raw data to display.")?;
                return Ok(true);
            }
            pager::write_page(&mut self.out, page, demographics)?;

            match self.ask(&more, validate_yes_no)? {
                None => return Ok(false),
                Some(false) => return Ok(true),
                Some(true) => {}
            }
        }
    }

    /// Prompt until `validate` accepts the answer.
    fn ask<T>(
        &mut self,
        question: &str,
        validate: impl Fn(&str) -> Result<T, InvalidInput>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(question)? else {
                return Ok(None);
            };
            match validate(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => {
                    debug!("rejected input {:?}: {reason:?}", line.trim());
                    writeln!(self.out, "\n{reason}")?;
                }
            }
        }
    }

    /// Print `prompt` and read one line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("reading user input")?;
        Ok((n > 0).then_some(line))
    }
}
