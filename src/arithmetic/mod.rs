//! Low-level arithmetic: fixed-width limb vectors and the Montgomery
//! multiplication engine built on top of them.

pub mod limbs;
pub mod montgomery;
