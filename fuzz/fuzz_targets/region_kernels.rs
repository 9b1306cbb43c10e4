//! Differential fuzzing of region multiply-by-constant.
//!
//! Every kernel the host supports must match the portable walk, and the
//! engine (kernel plus head/tail split) must match the scalar loop for any
//! offset and length.

#![no_main]

use arbitrary::Arbitrary;
use galois::{
  Engine, PackedArithmetic, RegionArithmetic,
  arithmetic::FullTable,
  config::{RegionConfig, RegionForce},
  field::{Binary4, Binary8},
  packed::{Packed, pack},
  simd::{self, NibbleTables},
};
use libfuzzer_sys::fuzz_target;
use platform::Detected;

#[derive(Arbitrary, Debug)]
struct Input {
  constant: u8,
  offset: u8,
  nibbles: bool,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  if input.data.is_empty() {
    return;
  }
  if input.nibbles {
    check::<Binary4>(pack::<Binary4>(input.constant & 0x0F), &input);
  } else {
    check::<Binary8>(input.constant, &input);
  }
});

fn check<F>(constant: u8, input: &Input)
where
  F: galois::SmallBinaryField,
{
  let packed = Packed::new(FullTable::<F>::new());
  let Some(tables) = NibbleTables::build(&packed) else {
    panic!("byte field must have nibble tables");
  };

  // ─── Kernels against the portable walk ───
  let results = simd::run_all_kernels(tables.get(constant), &input.data);
  for result in &results[1..] {
    assert_eq!(result.output, results[0].output, "{} disagrees with portable", result.name);
  }

  // ─── Engine against the scalar loop ───
  let engine = Engine::<FullTable<F>>::with_config(RegionConfig::forced(RegionForce::Accelerated), &Detected);
  let offset = usize::from(input.offset % 16).min(input.data.len() - 1);
  let mut buf = input.data.clone();
  engine.region_multiply_constant(&mut buf[offset..], constant);
  for (i, (&got, &original)) in buf.iter().zip(&input.data).enumerate() {
    let expected = if i < offset { original } else { packed.packed_multiply_constant(original, constant) };
    assert_eq!(got, expected, "index {i} offset {offset} constant {constant:#04x}");
  }
}
