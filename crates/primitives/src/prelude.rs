pub use crate::{
    batch::{BatchParseError, Transfer, TransferBatch},
    params::{BridgeParams, ParamsError, THRESHOLD_DENOM},
    sig::RecoverableSig,
    validator::{Power, ValidatorEntry, ValidatorSet, ValidatorSetError},
};
