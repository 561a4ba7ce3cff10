// Several instruction modules export a `handler` symbol.
#![allow(ambiguous_glob_reexports)]

pub mod admin;
pub mod burn;
pub mod execute_forward;
pub mod initialize;
pub mod mint;
pub mod multisig;
pub mod pause;
pub mod transfer;

pub use admin::*;
pub use burn::*;
pub use execute_forward::*;
pub use initialize::*;
pub use mint::*;
pub use multisig::*;
pub use pause::*;
pub use transfer::*;
