use sailgen_isa::*;

/// Encode `values` with `family`'s layout and check decoding gives them back.
pub fn assert_roundtrip(family: Family, values: &FieldValues) {
    let layout = family.layout();
    let binary = layout
        .encode(values)
        .unwrap_or_else(|e| panic!("{family}: encode failed: {e}"));
    let decoded = layout.decode(binary);
    for f in layout.fields {
        assert_eq!(
            decoded.get(f.name),
            values.get(f.name),
            "{family}: field `{}` mismatch in {binary:#010x}",
            f.name
        );
    }
}

/// Deterministic xorshift generator so sweeps are reproducible.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 32) as u32
    }
}

/// Random in-range values for every field of `family`.
pub fn random_values(family: Family, rng: &mut XorShift) -> FieldValues {
    let mut values: FieldValues = family
        .layout()
        .fields
        .iter()
        .map(|f| (f.name, rng.next_u32() & f.mask()))
        .collect();
    if family.layout().carries_binary {
        values.set(BINARY_FIELD, 0);
    }
    values
}
