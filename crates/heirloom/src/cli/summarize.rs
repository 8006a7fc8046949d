//! `heirloom summarize`.

use super::build_assembler;
use heirloom::{FragmentRepository, HeirloomConfig, NewRawInput, NewUser};
use std::path::Path;

/// Summarize one memory file and print the summary.
pub async fn run_summarize(
    config: &HeirloomConfig,
    file: &Path,
    max_length: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let assembler = build_assembler(config)?;
    let repo = assembler.repository();

    let user = repo
        .create_user(NewUser {
            name: "Storyteller".to_string(),
            email: "storyteller@heirloom.local".to_string(),
            phone_number: None,
        })
        .await?;
    let text = std::fs::read_to_string(file)?;
    let input = repo.create_input(NewRawInput::text(user.id, text)).await?;

    let summary = assembler.summarize_input(input.id, max_length).await?;
    println!("{}", summary);
    Ok(())
}
