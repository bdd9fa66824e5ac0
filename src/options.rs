use thiserror::Error;

use crate::type_checker::type_checker::InferenceMode;

/// Driver settings taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompileOptions {
    pub file_name: String,
    pub mode: InferenceMode,
    /// Print the token stream before parsing.
    pub dump_tokens: bool,
    /// Print the untyped tree before type checking.
    pub dump_ast: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("usage: frontend <file> [--dump-tokens] [--dump-ast] [--infer]")]
    MissingFile,
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    #[error("unexpected extra input file `{0}`")]
    ExtraFile(String),
}

impl CompileOptions {
    /// Builds options from the arguments after the program name.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, OptionsError> {
        let mut options = CompileOptions::default();
        let mut file_name = None;

        for arg in args {
            match arg.as_str() {
                "--dump-tokens" => options.dump_tokens = true,
                "--dump-ast" => options.dump_ast = true,
                "--infer" => options.mode = InferenceMode::Unification,
                flag if flag.starts_with("--") => return Err(OptionsError::UnknownFlag(arg)),
                _ if file_name.is_some() => return Err(OptionsError::ExtraFile(arg)),
                _ => file_name = Some(arg),
            }
        }

        options.file_name = file_name.ok_or(OptionsError::MissingFile)?;
        Ok(options)
    }
}
