use thiserror::Error;

pub type StocktakeResult<T> = Result<T, StocktakeError>;

#[derive(Error, Debug)]
pub enum StocktakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input parse error: {0}")]
    InputParse(String),

    #[error("Excel export error: {0}")]
    Export(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<calamine::Error> for StocktakeError {
    fn from(e: calamine::Error) -> Self {
        StocktakeError::InputParse(e.to_string())
    }
}
