//! `heirloom generate`.

use super::build_assembler;
use heirloom::{
    AssembleRequest, BranchType, FragmentRepository, HeirloomConfig, HeirloomResult, JsonError,
    NewBranch, NewRawInput, NewUser, StoryStyle,
};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Arguments of the generate command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Memory files, one fragment each
    pub files: Vec<PathBuf>,
    /// Storyteller's name
    pub name: String,
    /// Style tag
    pub style: String,
    /// Branch title, if the story belongs to one
    pub branch_title: Option<String>,
    /// Branch category tag
    pub branch_type: String,
}

/// Load the files as fragments, assemble a story, and print it as JSON.
pub async fn run_generate(
    config: &HeirloomConfig,
    options: GenerateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let assembler = build_assembler(config)?;
    let repo = assembler.repository();

    let user = repo
        .create_user(NewUser {
            name: options.name.clone(),
            email: format!("{}@heirloom.local", options.name.to_lowercase().replace(' ', ".")),
            phone_number: None,
        })
        .await?;

    let branch = match options.branch_title {
        Some(title) => {
            let branch_type = BranchType::from_str(&options.branch_type).unwrap_or_else(|_| {
                warn!(tag = %options.branch_type, "Unknown branch type, using general");
                BranchType::General
            });
            Some(
                repo.create_branch(NewBranch {
                    user_id: user.id,
                    branch_type,
                    title,
                    description: None,
                })
                .await?,
            )
        }
        None => None,
    };

    let mut input_ids = Vec::with_capacity(options.files.len());
    for path in &options.files {
        let text = std::fs::read_to_string(path)?;
        let mut input = NewRawInput::text(user.id, text);
        if let Some(branch) = &branch {
            input = input.in_branch(branch.id);
        }
        input_ids.push(repo.create_input(input).await?.id);
    }
    info!(fragments = input_ids.len(), "Loaded memory files");

    let mut request =
        AssembleRequest::new(user.id, input_ids).with_style(StoryStyle::from_tag(&options.style));
    if let Some(branch) = &branch {
        request = request.in_branch(branch.id);
    }

    let story = assembler.assemble(&request).await?;
    println!("{}", render(&story)?);
    Ok(())
}

fn render(story: &heirloom::Story) -> HeirloomResult<String> {
    serde_json::to_string_pretty(story).map_err(|e| JsonError::from(e).into())
}
