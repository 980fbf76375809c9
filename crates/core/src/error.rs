use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Unsupported file format: `{}`", .0)]
    UnsupportedFormat(String),

    #[error("Failed to parse `{}`: {}", .path, .message)]
    Malformed { path: String, message: String },

    #[error("Could not determine the home directory")]
    HomeResolution,

    #[error("Command `{}` is empty", .0)]
    EmptyCommand(String),

    #[error("No command named `{}` was found", .0)]
    CommandNotFound(String),

    #[error("Command index out of range: {}", .0)]
    CommandIndexOutOfRange(usize),

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("The sub process exited with non-success code{}.", exit_code_suffix(.0))]
    SubProcessExit(Option<i32>),

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" {code}"),
        None => String::new(),
    }
}

impl Error {
    pub fn io_error(file_description: &str, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path,
            original,
        }
    }

    pub fn malformed(path: String, message: impl ToString) -> Self {
        Self::Malformed {
            path,
            message: message.to_string(),
        }
    }
}
