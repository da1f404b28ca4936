use crate::client::AuthScheme;
use crate::error::FlowError;
use crate::prompt::Prompter;

/// Modes handled by collecting credential fields instead of a redirect.
pub fn is_basic_mode(auth_mode: &str) -> bool {
    matches!(auth_mode.to_ascii_lowercase().as_str(), "basic" | "api_key")
}

/// Pick the auth scheme to connect with.
///
/// An explicit `requested` mode must be one of the declared modes (compared
/// case-insensitively). Otherwise a single scheme is auto-selected and
/// several schemes are offered as a closed choice. `schemes` must be
/// non-empty.
pub fn resolve_auth_mode<'a>(
    schemes: &'a [AuthScheme],
    requested: Option<&str>,
    prompter: &dyn Prompter,
) -> Result<&'a AuthScheme, FlowError> {
    // First declaration of each mode wins.
    let mut distinct: Vec<&AuthScheme> = Vec::with_capacity(schemes.len());
    for scheme in schemes {
        if !distinct
            .iter()
            .any(|seen| seen.auth_mode.eq_ignore_ascii_case(&scheme.auth_mode))
        {
            distinct.push(scheme);
        }
    }

    if let Some(requested) = requested {
        return distinct
            .iter()
            .copied()
            .find(|scheme| scheme.auth_mode.eq_ignore_ascii_case(requested.trim()))
            .ok_or_else(|| FlowError::InvalidAuthMode {
                mode: requested.to_string(),
                choices: distinct.iter().map(|s| s.auth_mode.clone()).collect(),
            });
    }

    match distinct.as_slice() {
        [] => Err(FlowError::InvalidAuthMode {
            mode: String::new(),
            choices: Vec::new(),
        }),
        [only] => Ok(*only),
        many => {
            let modes: Vec<String> = many.iter().map(|s| s.auth_mode.clone()).collect();
            let index = prompter.choose("Select auth mode", &modes)?;
            many.get(index)
                .copied()
                .ok_or_else(|| FlowError::Prompt(format!("invalid choice index {index}")))
        }
    }
}
