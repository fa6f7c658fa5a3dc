//! Binding sets: the named values supplied for one kernel invocation.

use indexmap::IndexMap;

use fluidic_core::FieldSlot;

/// A concrete value for one kernel parameter.
///
/// Sampled inputs are either a field slot, resolved to that slot's
/// current front buffer when the kernel runs, or a caller-owned buffer
/// that is not part of the field store.
#[derive(Debug)]
pub enum Value<'a, B> {
    /// Scalar.
    Float(f32),
    /// 2-vector.
    Vec2([f32; 2]),
    /// 3-vector.
    Vec3([f32; 3]),
    /// 4-vector.
    Vec4([f32; 4]),
    /// The current generation of a field slot.
    Field(FieldSlot),
    /// A buffer owned outside the store.
    Buffer(&'a B),
}

impl<B> Value<'_, B> {
    /// Short description of the value's shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Field(_) => "field",
            Self::Buffer(_) => "buffer",
        }
    }
}

impl<B> Clone for Value<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Value<'_, B> {}

/// A transient map from parameter name to value, built per invocation.
///
/// Insertion order is preserved and determines texture-unit assignment.
/// Setting a name twice keeps the first position and the last value.
///
/// ```
/// use fluidic_core::FieldSlot;
/// use fluidic_kernel::Bindings;
///
/// let bindings: Bindings<'_, ()> = Bindings::new()
///     .field("velocity", FieldSlot::Velocity)
///     .vec3("d", [1.0 / 256.0, 1.0 / 256.0, 0.01])
///     .float("alpha", 1.0);
/// assert_eq!(bindings.len(), 3);
/// ```
#[derive(Debug)]
pub struct Bindings<'a, B> {
    values: IndexMap<&'a str, Value<'a, B>>,
}

impl<'a, B> Bindings<'a, B> {
    /// An empty binding set.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Insert a value.
    pub fn set(&mut self, name: &'a str, value: Value<'a, B>) {
        self.values.insert(name, value);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &'a str, value: Value<'a, B>) -> Self {
        self.set(name, value);
        self
    }

    /// Bind a scalar.
    pub fn float(self, name: &'a str, v: f32) -> Self {
        self.with(name, Value::Float(v))
    }

    /// Bind a 2-vector.
    pub fn vec2(self, name: &'a str, v: [f32; 2]) -> Self {
        self.with(name, Value::Vec2(v))
    }

    /// Bind a 3-vector.
    pub fn vec3(self, name: &'a str, v: [f32; 3]) -> Self {
        self.with(name, Value::Vec3(v))
    }

    /// Bind a 4-vector.
    pub fn vec4(self, name: &'a str, v: [f32; 4]) -> Self {
        self.with(name, Value::Vec4(v))
    }

    /// Bind the current generation of a field slot.
    pub fn field(self, name: &'a str, slot: FieldSlot) -> Self {
        self.with(name, Value::Field(slot))
    }

    /// Bind a caller-owned buffer.
    pub fn buffer(self, name: &'a str, buffer: &'a B) -> Self {
        self.with(name, Value::Buffer(buffer))
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<Value<'a, B>> {
        self.values.get(name).copied()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Value<'a, B>)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }
}

impl<B> Default for Bindings<'_, B> {
    fn default() -> Self {
        Self::new()
    }
}
