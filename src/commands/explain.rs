use clap::Args;
use serde::Serialize;

use varcase::refactor::{lexer, rules};
use varcase::Error;

use super::{CmdResult, ConfigArgs};

#[derive(Args)]
pub struct ExplainArgs {
    /// Identifiers to run through the rename rules
    #[arg(required = true)]
    pub identifiers: Vec<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Serialize)]
pub struct IdentifierExplanation {
    pub identifier: String,
    /// Result of the underscore-prefix rule, if it fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefixed: Option<String>,
    pub ignored: bool,
    pub result: String,
    pub changed: bool,
}

#[derive(Serialize)]
pub struct ExplainOutput {
    pub identifiers: Vec<IdentifierExplanation>,
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(lexer::is_ident_start) && chars.all(lexer::is_ident_continue)
}

pub fn run_json(args: ExplainArgs) -> CmdResult<ExplainOutput> {
    let config = args.config.resolve(&[])?;

    if let Some(bad) = args.identifiers.iter().find(|i| !is_identifier(i)) {
        return Err(Error::validation_invalid_argument(
            "identifiers",
            format!("'{}' is not an identifier", bad),
        ));
    }

    let identifiers = args
        .identifiers
        .iter()
        .map(|identifier| {
            let prefixed = rules::prefix_underscore(identifier);
            let result = rules::rewrite_identifier(identifier, &config)
                .unwrap_or_else(|| identifier.clone());
            IdentifierExplanation {
                identifier: identifier.clone(),
                ignored: config.is_ignored(prefixed.as_deref().unwrap_or(identifier)),
                changed: result != *identifier,
                prefixed,
                result,
            }
        })
        .collect();

    Ok((ExplainOutput { identifiers }, 0))
}
