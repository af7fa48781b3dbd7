use crate::error::{Result, SchemeError};
use crate::logic::matcher::rule_columns;
use crate::models::{Dataset, FarmerInput, RawValue};
use dialoguer::Input;

/// Ask for an answer to every rule column in the dataset. Blank answers are
/// kept blank, which the matcher treats as "not answered".
pub fn prompt_answers(dataset: &Dataset) -> Result<FarmerInput> {
    let columns = rule_columns(dataset);
    if columns.is_empty() {
        println!("This dataset has no eligibility columns to answer.");
        return Ok(FarmerInput::default());
    }

    println!("Answer each question (leave blank to skip):");
    println!();

    let mut pairs = Vec::with_capacity(columns.len());
    for column in columns {
        let answer: String = Input::new()
            .with_prompt(format!("  {}", column))
            .default(String::new())
            .allow_empty(true)
            .show_default(false)
            .interact_text()
            .map_err(|e| SchemeError::InvalidData(format!("Input error: {}", e)))?;
        pairs.push((column.to_string(), RawValue::from(answer)));
    }

    println!();
    Ok(FarmerInput::from_pairs(pairs))
}
