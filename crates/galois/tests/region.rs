//! Region operations through the full engine stack.

use galois::{
  Arithmetic, Element, Engine, Field, PackedArithmetic, RegionArithmetic,
  arithmetic::{FullTable, LogTable, OptimalPrime, SimpleOnline, Strategy},
  config::{RegionConfig, RegionForce},
  field::{Binary, Binary4, Binary8, Binary16, Prime2325},
  packed::{Packed, pack},
  simd::{self, NibbleTables},
};
use platform::Detected;

fn accelerated<S: Strategy>() -> Engine<S> {
  Engine::with_config(RegionConfig::forced(RegionForce::Accelerated), &Detected)
}

/// A 16-aligned window of `len` elements starting `offset` elements in.
fn window<V>(storage: &mut [V], offset: usize, len: usize) -> &mut [V] {
  let start = storage.as_ptr().align_offset(16);
  &mut storage[start + offset..start + offset + len]
}

fn fill<V: Element>(buf: &mut [V], seed: u32, max: V) {
  for (i, v) in buf.iter_mut().enumerate() {
    let x = (i as u32).wrapping_mul(2_654_435_761).wrapping_add(seed);
    *v = V::from_u32(x % (max.to_u32().saturating_add(1).max(1)));
  }
}

fn check_multiply_constant<S: Strategy>(constants: &[S::Value])
where
  S::Value: Element,
{
  let engine = accelerated::<S>();
  let reference = Packed::new(SimpleOnline::<S::Field>::new());
  let max = <S::Value as Element>::from_u32(u32::MAX);
  let mut storage = vec![S::Value::ZERO; 256 + 32];
  for &constant in constants {
    for offset in 0..16 {
      for len in [1usize, 2, 15, 16, 17, 31, 32, 33, 64, 100, 199, 200] {
        let buf = window(&mut storage, offset, len);
        fill(buf, len as u32, if <S::Field as Field>::ELEMENTS_PER_VALUE > 1 { max } else { <S::Field as Field>::MAX_VALUE });
        let expected: Vec<_> = buf.iter().map(|&b| reference.packed_multiply_constant(b, constant)).collect();
        engine.region_multiply_constant(buf, constant);
        assert_eq!(buf, &expected[..], "{} c={constant:?} offset={offset} len={len}", S::NAME);
      }
    }
  }
}

#[test]
fn multiply_constant_matches_scalar() {
  check_multiply_constant::<FullTable<Binary8>>(&[0, 1, 2, 0x1D, 0x80, 0xA7, 0xFF]);
  check_multiply_constant::<LogTable<Binary8>>(&[0, 1, 3, 0x53]);
  check_multiply_constant::<FullTable<Binary4>>(&[pack::<Binary4>(0), pack::<Binary4>(1), pack::<Binary4>(9), pack::<Binary4>(15)]);
  check_multiply_constant::<SimpleOnline<Binary>>(&[0x00, 0xFF]);
  check_multiply_constant::<LogTable<Binary16>>(&[0, 1, 0x8000, 0x1234]);
  check_multiply_constant::<OptimalPrime>(&[0, 1, 5, Prime2325::MAX_VALUE]);
}

#[test]
fn kernel_matches_portable_for_every_constant() {
  let tables = NibbleTables::build(&Packed::new(FullTable::<Binary8>::new())).unwrap();
  let mut storage = vec![0u8; 256];
  for constant in 0..=255u8 {
    for offset in 0..16 {
      let len = 16 * (1 + (constant as usize + offset) % 12);
      let data = window(&mut storage, offset, len);
      fill(data, u32::from(constant), 0xFF);
      let results = simd::run_all_kernels(tables.get(constant), data);
      let (reference, rest) = results.split_first().unwrap();
      for result in rest {
        assert_eq!(result.output, reference.output, "{} c={constant:#04x} offset={offset}", result.name);
      }
    }
  }
}

fn check_fused<S: Strategy>(constant: S::Value) {
  let engine = accelerated::<S>();
  let max = <S::Field as Field>::MAX_VALUE;
  let mut src = vec![S::Value::ZERO; 97];
  let mut dest = vec![S::Value::ZERO; 97];
  if <S::Field as Field>::ELEMENTS_PER_VALUE > 1 {
    fill(&mut src, 7, <S::Value as Element>::from_u32(u32::MAX));
    fill(&mut dest, 11, <S::Value as Element>::from_u32(u32::MAX));
  } else {
    fill(&mut src, 7, max);
    fill(&mut dest, 11, max);
  }

  let mut product = src.clone();
  engine.region_multiply_constant(&mut product, constant);

  let mut two_step = dest.clone();
  engine.region_add(&mut two_step, &product);
  let mut fused = dest.clone();
  engine.region_multiply_add(&mut fused, &src, constant);
  assert_eq!(fused, two_step, "{} multiply_add", S::NAME);

  let mut two_step = dest.clone();
  engine.region_subtract(&mut two_step, &product);
  let mut fused = dest.clone();
  engine.region_multiply_subtract(&mut fused, &src, constant);
  assert_eq!(fused, two_step, "{} multiply_subtract", S::NAME);

  // dest + src*c - src*c == dest
  engine.region_multiply_add(&mut fused, &src, constant);
  assert_eq!(fused, dest);
}

#[test]
fn fused_equals_two_step() {
  check_fused::<FullTable<Binary8>>(0x1D);
  check_fused::<LogTable<Binary16>>(0x100B);
  check_fused::<FullTable<Binary4>>(0x77);
  check_fused::<SimpleOnline<Binary>>(0xFF);
  check_fused::<OptimalPrime>(123_456_789);
}

#[test]
fn region_binary_ops_match_scalar() {
  let engine = accelerated::<LogTable<Binary8>>();
  let src: Vec<u8> = (1..=200u8).collect();
  let dest: Vec<u8> = (0..200u8).map(|x| x.wrapping_mul(31)).collect();

  let mut out = dest.clone();
  engine.region_multiply(&mut out, &src);
  for ((&o, &d), &s) in out.iter().zip(&dest).zip(&src) {
    assert_eq!(o, engine.multiply(d, s));
  }

  engine.region_divide(&mut out, &src);
  assert_eq!(out, dest);
}

#[test]
fn region_prime_ops_match_scalar() {
  let engine = accelerated::<OptimalPrime>();
  let src: Vec<u32> = (1..=64u32).map(|x| Prime2325::MAX_VALUE - x).collect();
  let dest: Vec<u32> = (0..64u32).map(|x| x * 0x0101_0101).collect();

  let mut out = dest.clone();
  engine.region_add(&mut out, &src);
  for ((&o, &d), &s) in out.iter().zip(&dest).zip(&src) {
    assert_eq!(o, engine.add(d, s));
  }
  engine.region_subtract(&mut out, &src);
  assert_eq!(out, dest);
}

#[test]
fn misaligned_source_takes_basic_path() {
  let engine = accelerated::<FullTable<Binary8>>();
  let mut storage = vec![0u8; 160];
  let start = storage.as_ptr().align_offset(16);
  let (left, right) = storage[start..].split_at_mut(64);
  let dest = &mut left[..48];
  let src = &right[1..49];
  if engine.enabled() {
    assert!(!engine_residues_match(&engine, dest, src));
  }

  let expected: Vec<u8> = dest.iter().zip(src).map(|(&d, &s)| engine.add(d, engine.multiply(s, 9))).collect();
  engine.region_multiply_add(dest, src, 9);
  assert_eq!(dest, &expected[..]);
}

fn engine_residues_match<S: Strategy>(engine: &Engine<S>, dest: &[S::Value], src: &[S::Value]) -> bool {
  use galois::RegionInfo;
  let a = engine.alignment().max(1);
  (dest.as_ptr() as usize) % a == (src.as_ptr() as usize) % a
}
