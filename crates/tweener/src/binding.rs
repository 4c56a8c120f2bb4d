//! Per-axis property bindings
//!
//! A tween animates up to four independent axes. Each axis may be bound to a
//! property of an external target through a getter/setter pair; the getter
//! seeds the axis value when the tween first starts, the setter writes the
//! interpolated value back after every update.
//!
//! Bindings replace the subclass-per-property pattern: a move tween is just a
//! tween with two pixel-snapped axes, an opacity tween a single exact axis.

/// Reads the current value of a bound property.
pub type AxisGetter<T> = fn(&T) -> f32;

/// Writes an interpolated value back to a bound property.
pub type AxisSetter<T> = fn(&mut T, f32);

/// How an axis value is written back to its property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Write the interpolated value as-is.
    #[default]
    Exact,
    /// Truncate toward negative infinity before writing.
    ///
    /// This is a strict contract for integer-valued properties: `floor`, not
    /// rounding and not truncation toward zero, so pixel-aligned movement
    /// behaves identically on both sides of zero.
    Floor,
}

/// A single axis bound to an external property.
pub struct AxisBinding<T> {
    get: AxisGetter<T>,
    set: AxisSetter<T>,
    mode: WriteMode,
}

impl<T> AxisBinding<T> {
    /// Bind an axis with exact writes (opacity, zoom, angles).
    pub fn new(get: AxisGetter<T>, set: AxisSetter<T>) -> Self {
        Self {
            get,
            set,
            mode: WriteMode::Exact,
        }
    }

    /// Bind an axis with floored writes (pixel positions, origin offsets).
    pub fn pixel(get: AxisGetter<T>, set: AxisSetter<T>) -> Self {
        Self {
            get,
            set,
            mode: WriteMode::Floor,
        }
    }

    /// The write mode of this binding.
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Read the current property value from the target.
    pub fn read(&self, target: &T) -> f32 {
        (self.get)(target)
    }

    /// Write an interpolated value to the target, applying the write mode.
    pub fn write(&self, target: &mut T, value: f32) {
        let value = match self.mode {
            WriteMode::Exact => value,
            WriteMode::Floor => value.floor(),
        };
        (self.set)(target, value);
    }
}

// Manual impls: fn pointers are Copy for any T, derive would require T: Clone.
impl<T> Clone for AxisBinding<T> {
    fn clone(&self) -> Self {
        Self {
            get: self.get,
            set: self.set,
            mode: self.mode,
        }
    }
}

impl<T> Copy for AxisBinding<T> {}
