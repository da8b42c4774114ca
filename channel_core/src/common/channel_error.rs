use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the channel system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Fit errors (0-99)
    #[strum(serialize = "_FIT_ERR_BEGIN")]
    FitErrBegin = 0,
    #[strum(serialize = "INSUFFICIENT_DATA")]
    InsufficientData = 1,
    #[strum(serialize = "NON_MONOTONIC_INDEX")]
    NonMonotonicIndex = 2,
    #[strum(serialize = "INVALID_MULTIPLIER")]
    InvalidMultiplier = 3,
    #[strum(serialize = "DEGENERATE_INPUT")]
    DegenerateInput = 4,
    #[strum(serialize = "_FIT_ERR_END")]
    FitErrEnd = 99,

    // KL data errors (200-299)
    #[strum(serialize = "_KL_ERR_BEGIN")]
    KlErrBegin = 200,
    #[strum(serialize = "KL_DATA_INVALID")]
    KlDataInvalid = 203,
    #[strum(serialize = "NO_DATA")]
    NoData = 210,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 218,
    #[strum(serialize = "_KL_ERR_END")]
    KlErrEnd = 299,

    // Config errors (300-399)
    #[strum(serialize = "_CONFIG_ERR_BEGIN")]
    ConfigErrBegin = 300,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 301,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 302,
    #[strum(serialize = "_CONFIG_ERR_END")]
    ConfigErrEnd = 399,
}

impl ErrCode {
    fn within(&self, begin: ErrCode, end: ErrCode) -> bool {
        let code = *self as i32;
        code > begin as i32 && code < end as i32
    }

    pub fn is_fit_err(&self) -> bool {
        self.within(Self::FitErrBegin, Self::FitErrEnd)
    }

    pub fn is_kldata_err(&self) -> bool {
        self.within(Self::KlErrBegin, Self::KlErrEnd)
    }

    pub fn is_config_err(&self) -> bool {
        self.within(Self::ConfigErrBegin, Self::ConfigErrEnd)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChannelError {
    #[error("at least 2 observations are required, got {n}")]
    InsufficientData { n: usize },

    #[error("index {index} at position {position} does not follow {previous}")]
    NonMonotonicIndex {
        position: usize,
        previous: usize,
        index: usize,
    },

    #[error("band multiplier must be finite and >= 0, got {k}")]
    InvalidMultiplier { k: f64 },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("invalid bar: {0}")]
    KlDataInvalid(String),

    #[error("no data: {0}")]
    NoData(String),

    #[error("malformed source data: {0}")]
    SrcDataFormat(String),

    #[error("bad config: {0}")]
    Config(String),

    #[error("unknown para = {0}")]
    UnknownPara(String),
}

impl ChannelError {
    pub fn errcode(&self) -> ErrCode {
        match self {
            Self::InsufficientData { .. } => ErrCode::InsufficientData,
            Self::NonMonotonicIndex { .. } => ErrCode::NonMonotonicIndex,
            Self::InvalidMultiplier { .. } => ErrCode::InvalidMultiplier,
            Self::DegenerateInput(_) => ErrCode::DegenerateInput,
            Self::KlDataInvalid(_) => ErrCode::KlDataInvalid,
            Self::NoData(_) => ErrCode::NoData,
            Self::SrcDataFormat(_) => ErrCode::SrcDataFormatError,
            Self::Config(_) => ErrCode::ConfigError,
            Self::UnknownPara(_) => ErrCode::ParaError,
        }
    }

    pub fn is_fit_err(&self) -> bool {
        self.errcode().is_fit_err()
    }

    pub fn is_kldata_err(&self) -> bool {
        self.errcode().is_kldata_err()
    }

    pub fn is_config_err(&self) -> bool {
        self.errcode().is_config_err()
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
