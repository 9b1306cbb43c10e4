//! The field engine: one field, one scalar strategy, one region stack.
//!
//! ```text
//!                 EqualAlignment
//!                /              \
//!   RegionDispatcher          RegionLoop      (basic)
//!     |        \
//!  RegionLoop   split-nibble kernel           (optimized)
//!        \      /
//!       Packed<S>  (shared, immutable)
//! ```
//!
//! Everything is built in [`Engine::with_config`]; afterwards the engine is
//! immutable and may be shared between threads.

use alloc::sync::Arc;

use backend::KernelTier;
use platform::{Detected, Probe};
use traits::{Arithmetic, ArithmeticError, Element, Field, PackedArithmetic, RegionArithmetic, RegionInfo};

use crate::{
  arithmetic::{FullTable, LogTable, OptimalPrime, SimpleOnline, Strategy},
  config::{self, RegionConfig, RegionForce},
  field::Prime2325,
  introspect::EngineInfo,
  packed::{Packed, is_packed_constant},
  region::{EqualAlignment, MultiplyConstantKernel, RegionDispatcher, RegionLoop},
  simd::{self, NibbleTables},
};

type Basic<S> = RegionLoop<Packed<S>>;
type Optimized<S> = RegionDispatcher<Basic<S>>;

/// A composed finite-field engine.
///
/// ```
/// use galois::{Engine, RegionArithmetic, arithmetic::LogTable, field::Binary8};
/// use galois::Arithmetic;
///
/// let gf = Engine::<LogTable<Binary8>>::new();
/// assert_eq!(gf.multiply(3, 7), 9);
///
/// let mut buf = [1u8, 2, 3, 4];
/// gf.region_multiply_constant(&mut buf, 2);
/// assert_eq!(buf, [2, 4, 6, 8]);
/// ```
#[derive(Debug)]
pub struct Engine<S: Strategy> {
  packed: Arc<Packed<S>>,
  region: EqualAlignment<Optimized<S>, Basic<S>>,
  force: RegionForce,
  threshold: usize,
}

/// Direct computation for any field.
pub type SimpleOnlineEngine<F> = Engine<SimpleOnline<F>>;
/// Log/antilog tables for a binary field.
pub type LogTableEngine<F> = Engine<LogTable<F>>;
/// Full multiply/divide tables for a binary field of order ≤ 256.
pub type FullTableEngine<F> = Engine<FullTable<F>>;
/// Folding arithmetic for GF(2^32 - 5).
pub type OptimalPrimeEngine = Engine<OptimalPrime>;

impl<S: Strategy> Engine<S> {
  /// Build with the process probe and the environment configuration.
  #[must_use]
  pub fn new() -> Self {
    Self::with_config(config::get(), &Detected)
  }

  /// Build with an explicit configuration and capability probe.
  ///
  /// The probe can only narrow what the host supports: a kernel is resolved
  /// against the intersection of `probe.caps()` and [`platform::caps()`].
  #[must_use]
  pub fn with_config<P: Probe + ?Sized>(config: RegionConfig, probe: &P) -> Self {
    let caps = probe.caps() & platform::caps();
    let (force, threshold) = config.effective(caps);
    let packed = Arc::new(Packed::new(S::build()));

    let kernel = match force {
      RegionForce::Portable => None,
      RegionForce::Auto | RegionForce::Accelerated => simd::resolve(caps).and_then(|selected| {
        NibbleTables::build(&*packed).map(|tables| MultiplyConstantKernel::new(selected, tables, threshold))
      }),
    };

    let basic = RegionLoop::new(Arc::clone(&packed));
    let optimized = RegionDispatcher::new(basic.clone(), kernel);
    let engine = Self {
      packed,
      region: EqualAlignment::new(optimized, basic),
      force,
      threshold,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
      field = <S::Field as Field>::NAME,
      strategy = S::NAME,
      kernel = engine.kernel_name(),
      tier = engine.tier().name(),
      force = force.as_str(),
      threshold,
      "galois engine resolved"
    );

    engine
  }

  /// `true` iff region multiply-by-constant may run an accelerated kernel.
  #[inline]
  #[must_use]
  pub fn enabled(&self) -> bool {
    self.region.optimized().enabled()
  }

  /// Name of the resolved region kernel, or `"portable"`.
  #[inline]
  #[must_use]
  pub fn kernel_name(&self) -> &'static str {
    self.region.optimized().kernel().map_or("portable", MultiplyConstantKernel::name)
  }

  /// Tier of the fastest path this engine uses.
  #[inline]
  #[must_use]
  pub fn tier(&self) -> KernelTier {
    self.region.optimized().kernel().map_or(S::TIER, MultiplyConstantKernel::tier)
  }

  /// The shared packed arithmetic.
  #[inline]
  #[must_use]
  pub fn packed(&self) -> &Packed<S> {
    &self.packed
  }

  /// The scalar strategy.
  #[inline]
  #[must_use]
  pub fn strategy(&self) -> &S {
    self.packed.scalar()
  }

  /// Summary of what was resolved at construction.
  #[must_use]
  pub fn describe(&self) -> EngineInfo {
    EngineInfo {
      field: <S::Field as Field>::NAME,
      strategy: S::NAME,
      kernel: self.kernel_name(),
      tier: self.tier(),
      force: self.force,
      threshold: self.threshold,
      alignment: self.alignment(),
      granularity: self.granularity(),
    }
  }

  // ───────────────────────────────────────────────────────────────────────────
  // Checked operations
  // ───────────────────────────────────────────────────────────────────────────

  #[inline]
  fn check_element(a: S::Value) -> Result<(), ArithmeticError> {
    if a > <S::Field as Field>::MAX_VALUE {
      return Err(ArithmeticError::OutOfRange);
    }
    Ok(())
  }

  fn check_constant(constant: S::Value) -> Result<(), ArithmeticError> {
    if <S::Field as Field>::ELEMENTS_PER_VALUE == 1 {
      Self::check_element(constant)
    } else if is_packed_constant::<S::Field>(constant) {
      Ok(())
    } else {
      Err(ArithmeticError::UnpackedConstant)
    }
  }

  fn check_regions(dest: &[S::Value], src: &[S::Value]) -> Result<(), ArithmeticError> {
    if dest.is_empty() {
      return Err(ArithmeticError::EmptyRegion);
    }
    if dest.len() != src.len() {
      return Err(ArithmeticError::LengthMismatch);
    }
    Ok(())
  }

  /// `1 / a`, rejecting zero and out-of-range input.
  pub fn try_invert(&self, a: S::Value) -> Result<S::Value, ArithmeticError> {
    Self::check_element(a)?;
    if a == S::Value::ZERO {
      return Err(ArithmeticError::ZeroDivisor);
    }
    Ok(self.invert(a))
  }

  /// `a / b`, rejecting a zero divisor and out-of-range input.
  pub fn try_divide(&self, a: S::Value, b: S::Value) -> Result<S::Value, ArithmeticError> {
    Self::check_element(a)?;
    Self::check_element(b)?;
    if b == S::Value::ZERO {
      return Err(ArithmeticError::ZeroDivisor);
    }
    Ok(self.divide(a, b))
  }

  /// [`region_multiply_constant`](RegionArithmetic::region_multiply_constant)
  /// with its preconditions checked.
  pub fn try_region_multiply_constant(&self, dest: &mut [S::Value], constant: S::Value) -> Result<(), ArithmeticError> {
    if dest.is_empty() {
      return Err(ArithmeticError::EmptyRegion);
    }
    Self::check_constant(constant)?;
    self.region_multiply_constant(dest, constant);
    Ok(())
  }

  /// [`region_multiply_add`](RegionArithmetic::region_multiply_add) with its
  /// preconditions checked.
  pub fn try_region_multiply_add(
    &self,
    dest: &mut [S::Value],
    src: &[S::Value],
    constant: S::Value,
  ) -> Result<(), ArithmeticError> {
    Self::check_regions(dest, src)?;
    Self::check_constant(constant)?;
    self.region_multiply_add(dest, src, constant);
    Ok(())
  }

  /// [`region_multiply_subtract`](RegionArithmetic::region_multiply_subtract)
  /// with its preconditions checked.
  pub fn try_region_multiply_subtract(
    &self,
    dest: &mut [S::Value],
    src: &[S::Value],
    constant: S::Value,
  ) -> Result<(), ArithmeticError> {
    Self::check_regions(dest, src)?;
    Self::check_constant(constant)?;
    self.region_multiply_subtract(dest, src, constant);
    Ok(())
  }
}

impl<S: Strategy> Default for Engine<S> {
  fn default() -> Self {
    Self::new()
  }
}

impl OptimalPrimeEngine {
  /// The prime modulus, `2^32 - 5`.
  pub const MODULUS: u32 = Prime2325::MODULUS;
}

// ─────────────────────────────────────────────────────────────────────────────
// Trait delegation
// ─────────────────────────────────────────────────────────────────────────────

impl<S: Strategy> Arithmetic for Engine<S> {
  type Value = S::Value;
  type Field = S::Field;

  #[inline]
  fn add(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.add(a, b)
  }

  #[inline]
  fn subtract(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.subtract(a, b)
  }

  #[inline]
  fn multiply(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.multiply(a, b)
  }

  #[inline]
  fn divide(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.divide(a, b)
  }

  #[inline]
  fn invert(&self, a: S::Value) -> S::Value {
    self.packed.invert(a)
  }

  #[inline]
  fn negate(&self, a: S::Value) -> S::Value {
    self.packed.negate(a)
  }

  #[inline]
  fn constant_row(&self, constant: S::Value) -> Option<&[S::Value]> {
    self.packed.constant_row(constant)
  }
}

impl<S: Strategy> PackedArithmetic for Engine<S> {
  #[inline]
  fn packed_add(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.packed_add(a, b)
  }

  #[inline]
  fn packed_subtract(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.packed_subtract(a, b)
  }

  #[inline]
  fn packed_multiply(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.packed_multiply(a, b)
  }

  #[inline]
  fn packed_divide(&self, a: S::Value, b: S::Value) -> S::Value {
    self.packed.packed_divide(a, b)
  }

  #[inline]
  fn packed_invert(&self, a: S::Value) -> S::Value {
    self.packed.packed_invert(a)
  }

  #[inline]
  fn packed_multiply_constant(&self, a: S::Value, constant: S::Value) -> S::Value {
    self.packed.packed_multiply_constant(a, constant)
  }

  #[inline]
  fn packed_constant_row(&self, constant: S::Value) -> Option<&[S::Value]> {
    self.packed.packed_constant_row(constant)
  }
}

impl<S: Strategy> RegionInfo for Engine<S> {
  #[inline]
  fn alignment(&self) -> usize {
    self.region.alignment()
  }

  #[inline]
  fn max_alignment(&self) -> usize {
    self.region.max_alignment()
  }

  #[inline]
  fn granularity(&self) -> usize {
    self.region.granularity()
  }

  #[inline]
  fn max_granularity(&self) -> usize {
    self.region.max_granularity()
  }
}

impl<S: Strategy> RegionArithmetic for Engine<S> {
  type Value = S::Value;

  #[inline]
  fn region_add(&self, dest: &mut [S::Value], src: &[S::Value]) {
    self.region.region_add(dest, src);
  }

  #[inline]
  fn region_subtract(&self, dest: &mut [S::Value], src: &[S::Value]) {
    self.region.region_subtract(dest, src);
  }

  #[inline]
  fn region_multiply(&self, dest: &mut [S::Value], src: &[S::Value]) {
    self.region.region_multiply(dest, src);
  }

  #[inline]
  fn region_divide(&self, dest: &mut [S::Value], src: &[S::Value]) {
    self.region.region_divide(dest, src);
  }

  #[inline]
  fn region_multiply_constant(&self, dest: &mut [S::Value], constant: S::Value) {
    self.region.region_multiply_constant(dest, constant);
  }

  #[inline]
  fn region_multiply_add(&self, dest: &mut [S::Value], src: &[S::Value], constant: S::Value) {
    self.region.region_multiply_add(dest, src, constant);
  }

  #[inline]
  fn region_multiply_subtract(&self, dest: &mut [S::Value], src: &[S::Value], constant: S::Value) {
    self.region.region_multiply_subtract(dest, src, constant);
  }
}

#[cfg(test)]
mod tests {
  use alloc::vec;

  use platform::{Caps, Fixed};

  use super::*;
  use crate::field::{Binary, Binary4, Binary8, Binary16};

  const fn assert_send_sync<T: Send + Sync>() {}
  const _: () = assert_send_sync::<FullTableEngine<Binary8>>();
  const _: () = assert_send_sync::<OptimalPrimeEngine>();

  #[test]
  fn no_caps_means_portable() {
    let engine = FullTableEngine::<Binary8>::with_config(RegionConfig::default(), &Fixed(Caps::NONE));
    assert!(!engine.enabled());
    assert_eq!(engine.kernel_name(), "portable");
    assert_eq!(engine.tier(), KernelTier::Table);
    assert_eq!(engine.alignment(), 1);
    assert_eq!(engine.granularity(), 1);
  }

  #[test]
  fn forced_portable_disables_kernel() {
    let engine = LogTableEngine::<Binary8>::with_config(RegionConfig::forced(RegionForce::Portable), &Detected);
    assert!(!engine.enabled());
    assert_eq!(engine.describe().force, RegionForce::Portable);
  }

  #[test]
  fn wide_fields_never_take_a_kernel() {
    let binary16 = LogTableEngine::<Binary16>::with_config(RegionConfig::default(), &Detected);
    assert!(!binary16.enabled());
    assert_eq!(binary16.alignment(), 2);

    let prime = OptimalPrimeEngine::with_config(RegionConfig::default(), &Detected);
    assert!(!prime.enabled());
    assert_eq!(prime.tier(), KernelTier::Reference);
    assert_eq!(prime.alignment(), 4);
  }

  #[test]
  fn kernel_state_follows_host() {
    let engine = FullTableEngine::<Binary4>::with_config(RegionConfig::default(), &Detected);
    assert_eq!(engine.enabled(), simd::resolve(platform::caps()).is_some());
    if engine.enabled() {
      assert_eq!(engine.tier(), KernelTier::Simd);
      assert_eq!(engine.alignment(), simd::ALIGNMENT);
    }
  }

  #[test]
  fn scalar_and_packed_ops() {
    let engine = SimpleOnlineEngine::<Binary>::with_config(RegionConfig::default(), &Fixed(Caps::NONE));
    assert_eq!(engine.multiply(1, 1), 1);
    assert_eq!(engine.add(1, 1), 0);
    assert_eq!(engine.packed_multiply(0xF0, 0x3C), 0x30);

    let prime = OptimalPrimeEngine::with_config(RegionConfig::default(), &Fixed(Caps::NONE));
    assert_eq!(prime.negate(1), OptimalPrimeEngine::MODULUS - 1);
    assert_eq!(prime.multiply(prime.invert(2), 2), 1);
  }

  #[test]
  fn checked_scalar_ops() {
    let engine = LogTableEngine::<Binary4>::with_config(RegionConfig::default(), &Fixed(Caps::NONE));
    assert_eq!(engine.try_invert(0), Err(ArithmeticError::ZeroDivisor));
    assert_eq!(engine.try_invert(16), Err(ArithmeticError::OutOfRange));
    assert_eq!(engine.try_divide(3, 0), Err(ArithmeticError::ZeroDivisor));
    assert_eq!(engine.try_divide(20, 1), Err(ArithmeticError::OutOfRange));
    let inverse = engine.try_invert(7).unwrap();
    assert_eq!(engine.multiply(inverse, 7), 1);
  }

  #[test]
  fn checked_region_ops() {
    let engine = FullTableEngine::<Binary4>::with_config(RegionConfig::default(), &Fixed(Caps::NONE));
    let mut empty: [u8; 0] = [];
    assert_eq!(engine.try_region_multiply_constant(&mut empty, 0x22), Err(ArithmeticError::EmptyRegion));

    let mut dest = vec![0x12u8; 8];
    assert_eq!(engine.try_region_multiply_constant(&mut dest, 0x23), Err(ArithmeticError::UnpackedConstant));
    assert_eq!(
      engine.try_region_multiply_add(&mut dest, &[1, 2, 3], 0x22),
      Err(ArithmeticError::LengthMismatch)
    );
    assert_eq!(dest, vec![0x12u8; 8]);

    engine.try_region_multiply_constant(&mut dest, 0x11).unwrap();
    assert_eq!(dest, vec![0x12u8; 8]);

    let src = vec![0x12u8; 8];
    engine.try_region_multiply_subtract(&mut dest, &src, 0x11).unwrap();
    assert_eq!(dest, vec![0u8; 8]);
  }

  #[test]
  fn describe_reports_resolution() {
    let engine = FullTableEngine::<Binary8>::with_config(
      RegionConfig {
        force: RegionForce::Auto,
        threshold: 256,
      },
      &Fixed(Caps::NONE),
    );
    let info = engine.describe();
    assert_eq!(info.field, "binary8");
    assert_eq!(info.strategy, "full-table");
    assert_eq!(info.kernel, "portable");
    assert_eq!(info.threshold, 256);
    assert_eq!(alloc::format!("{info}"), "binary8/full-table: kernel=portable tier=table force=auto alignment=1 granularity=1");
  }
}
