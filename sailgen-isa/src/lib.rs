//! RISC-V encoding families recognised by the Sail stub generator.
//!
//! Every family owns one fixed bit layout. The same layout drives the
//! reference encoder/decoder in this crate and the C bodies produced by
//! [`template::render`], so the generated code and the Rust model agree.
//!
//! ```
//! use sailgen_isa::{Family, FieldValues};
//!
//! let family = Family::classify("mapping clause encdec = ITYPE(imm, rs1, rd, op)");
//! assert_eq!(family, Family::I);
//!
//! let values = FieldValues::new().with("imm", 5).with("rd", 1).with("iop", 0x13);
//! let binary = family.layout().encode(&values)?;
//! assert_eq!(family.layout().decode(binary), values);
//! # Ok::<(), sailgen_isa::EncodeError>(())
//! ```

mod family;
mod layout;
pub mod template;

pub use family::Family;
pub use layout::{BINARY_FIELD, BitField, EncodeError, FieldValues, Layout, Operand};
