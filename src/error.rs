use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BcError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("not specified the key, need one of <--key | --kfile>")]
    NoKey,

    #[error("only input the one input data source of <PIPE | STRING | ifile>")]
    MultipleDataSource,

    #[error("not specified the input data, need one of <PIPE | STRING | ifile>")]
    NoDataSource,
}
