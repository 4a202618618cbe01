use std::collections::BTreeMap;
use std::fmt::Write;

use crate::Family;

/// Name of the packed instruction word in generated records.
pub const BINARY_FIELD: &str = "binary";

/// Errors from [`Layout::encode`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A field required by the layout has no value.
    #[error("missing value for field `{0}`")]
    MissingField(&'static str),
    /// The value has bits set above the field width.
    #[error("value {value:#x} does not fit in the {width}-bit field `{field}`")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        width: u32,
    },
}

/// One contiguous field of an instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField {
    pub name: &'static str,
    /// Position of the least significant bit.
    pub shift: u32,
    pub width: u32,
}

impl BitField {
    pub const fn new(name: &'static str, shift: u32, width: u32) -> Self {
        Self { name, shift, width }
    }

    /// Unshifted mask covering `width` bits.
    #[inline]
    pub const fn mask(&self) -> u32 {
        (1u32 << self.width) - 1
    }
}

/// Operand shape printed by the disassembly template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Printed as `r<value>`.
    Reg(&'static str),
    /// Printed as a decimal number.
    Imm(&'static str),
}

impl Operand {
    pub const fn field(self) -> &'static str {
        match self {
            Operand::Reg(name) | Operand::Imm(name) => name,
        }
    }

    /// `printf` conversion for this operand.
    pub(crate) const fn conversion(self) -> &'static str {
        match self {
            Operand::Reg(_) => "r%d",
            Operand::Imm(_) => "%d",
        }
    }
}

/// Fixed bit layout of an encoding family.
#[derive(Debug)]
pub struct Layout {
    pub family: Family,
    /// Variable fields, most significant first.
    pub fields: &'static [BitField],
    /// Constant bits ORed into every encoding (the J-family opcode).
    pub fixed_bits: u32,
    /// Whether the previous `binary` value is ORed back in on encode.
    pub carries_binary: bool,
    /// Representative mnemonic printed by the disassembly template.
    pub mnemonic: &'static str,
    pub operands: &'static [Operand],
}

pub(crate) static U_LAYOUT: Layout = Layout {
    family: Family::U,
    fields: &[
        BitField::new("imm", 12, 20),
        BitField::new("rd", 7, 5),
        BitField::new("uop", 0, 7),
    ],
    fixed_bits: 0,
    carries_binary: false,
    mnemonic: "LUI",
    operands: &[Operand::Reg("rd"), Operand::Imm("imm")],
};

pub(crate) static J_LAYOUT: Layout = Layout {
    family: Family::J,
    fields: &[BitField::new("imm", 12, 20), BitField::new("rd", 7, 5)],
    fixed_bits: 0b110_1111,
    carries_binary: false,
    mnemonic: "JAL",
    operands: &[Operand::Reg("rd"), Operand::Imm("imm")],
};

pub(crate) static I_LAYOUT: Layout = Layout {
    family: Family::I,
    fields: &[
        BitField::new("imm", 20, 12),
        BitField::new("rd", 7, 5),
        BitField::new("iop", 0, 7),
    ],
    fixed_bits: 0,
    carries_binary: false,
    mnemonic: "ORI",
    operands: &[Operand::Reg("rd"), Operand::Imm("imm")],
};

pub(crate) static R_LAYOUT: Layout = Layout {
    family: Family::R,
    fields: &[
        BitField::new("funct7", 25, 7),
        BitField::new("rs2", 20, 5),
        BitField::new("rs1", 15, 5),
        BitField::new("funct3", 12, 3),
        BitField::new("rd", 7, 5),
        BitField::new("rop", 0, 7),
    ],
    fixed_bits: 0,
    carries_binary: false,
    mnemonic: "ADD",
    operands: &[Operand::Reg("rd"), Operand::Reg("rs1"), Operand::Reg("rs2")],
};

pub(crate) static GENERIC_LAYOUT: Layout = Layout {
    family: Family::Generic,
    fields: &[BitField::new("rd", 7, 5)],
    fixed_bits: 0,
    carries_binary: true,
    mnemonic: "GENERIC",
    operands: &[Operand::Reg("rd")],
};

impl Layout {
    /// Pack field values into an instruction word.
    ///
    /// Families that carry the previous word read it from the
    /// [`BINARY_FIELD`] entry of `values`.
    pub fn encode(&self, values: &FieldValues) -> Result<u32, EncodeError> {
        let mut binary = self.fixed_bits;
        if self.carries_binary {
            binary |= values
                .get(BINARY_FIELD)
                .ok_or(EncodeError::MissingField(BINARY_FIELD))?;
        }
        for field in self.fields {
            let value = values
                .get(field.name)
                .ok_or(EncodeError::MissingField(field.name))?;
            if value & !field.mask() != 0 {
                return Err(EncodeError::FieldOutOfRange {
                    field: field.name,
                    value,
                    width: field.width,
                });
            }
            binary |= value << field.shift;
        }
        Ok(binary)
    }

    /// Unpack every variable field of `binary`.
    pub fn decode(&self, binary: u32) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.name, (binary >> f.shift) & f.mask()))
            .collect()
    }

    /// Render the text the generated `printf` produces for `values`.
    /// Missing operands print as zero.
    pub fn format_assembly(&self, values: &FieldValues, mnemonic: &str) -> String {
        let mut out = String::from(mnemonic);
        for (i, operand) in self.operands.iter().enumerate() {
            out.push_str(if i == 0 { " " } else { ", " });
            // %d prints the field as a signed int.
            let value = values.get(operand.field()).unwrap_or(0) as i32;
            let _ = match operand {
                Operand::Reg(_) => write!(out, "r{value}"),
                Operand::Imm(_) => write!(out, "{value}"),
            };
        }
        out
    }
}

/// Field name to value map for the reference encoder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<&'static str, u32>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: &'static str, value: u32) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &'static str, value: u32) {
        let _ = self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(&'static str, u32)> for FieldValues {
    fn from_iter<T: IntoIterator<Item = (&'static str, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
