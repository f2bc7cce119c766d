//! Pure input validation for the interactive prompts and the command line.

use chrono::{Month, Weekday};
use thiserror::Error;

use crate::data::filter::Choice;
use crate::data::model::{weekday_name, City, MONTH_NAMES, WEEKDAYS};

/// Why a piece of user input was rejected. The message is shown verbatim
/// before re-prompting.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Invalid entry! Please choose one of the three cities.")]
    UnknownCity,
    #[error("Invalid entry! Please choose a month between January and June or type 'all'.")]
    UnknownMonth,
    #[error("Invalid entry! Please choose a valid weekday or type 'all'.")]
    UnknownWeekday,
    #[error("Invalid input, please try again")]
    NotYesOrNo,
}

/// Case-insensitive city name.
pub fn validate_city(input: &str) -> Result<City, InvalidInput> {
    City::from_name(&input.trim().to_lowercase()).ok_or(InvalidInput::UnknownCity)
}

/// `all` or a month from January to June, case-insensitive.
pub fn validate_month(input: &str) -> Result<Choice<Month>, InvalidInput> {
    let input = input.trim().to_lowercase();
    if input == "all" {
        return Ok(Choice::All);
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.to_lowercase() == input)
        .and_then(|i| Month::try_from(i as u8 + 1).ok())
        .map(Choice::Only)
        .ok_or(InvalidInput::UnknownMonth)
}

/// `all` or a weekday name, matched after title-casing.
pub fn validate_weekday(input: &str) -> Result<Choice<Weekday>, InvalidInput> {
    let input = title_case(input.trim());
    if input == "All" {
        return Ok(Choice::All);
    }
    WEEKDAYS
        .iter()
        .find(|day| weekday_name(**day) == input)
        .map(|day| Choice::Only(*day))
        .ok_or(InvalidInput::UnknownWeekday)
}

/// `yes` → true, `no` → false, case-insensitive.
pub fn validate_yes_no(input: &str) -> Result<bool, InvalidInput> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(InvalidInput::NotYesOrNo),
    }
}

/// Upper-case the first letter of every word, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
