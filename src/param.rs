use std::{
    any::Any,
    borrow::Cow,
    fmt::{Debug, Display},
    ops::Deref,
};

pub type BoxedValue = Box<dyn ParamValue>;

/// A resolved parameter value of any underlying type.
///
/// Hosts resolve parametrization before selection runs, so the concrete type
/// behind a value is unknown to this crate. Matching only ever looks at the
/// textual form, which is why [`Display`] is required here.
pub trait ParamValue: Any + Debug + Display + Send + Sync + 'static {
    fn clone_value(&self) -> BoxedValue;
    fn eq_value(&self, other: &dyn ParamValue) -> bool;
}

impl<T> ParamValue for T
where
    T: Any + Debug + Display + Clone + Eq + Send + Sync,
{
    fn clone_value(&self) -> BoxedValue {
        Box::new(self.clone())
    }

    fn eq_value(&self, other: &dyn ParamValue) -> bool {
        (other as &dyn Any)
            .downcast_ref::<T>()
            .map(|other| other == self)
            .unwrap_or(false)
    }
}

impl Clone for BoxedValue {
    fn clone(&self) -> Self {
        self.clone_value()
    }
}

impl PartialEq for BoxedValue {
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other.deref())
    }
}

impl Eq for BoxedValue {}

/// Insertion-ordered map of parameter or fixture names to resolved values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(Vec<(Cow<'static, str>, BoxedValue)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resolved value under `name`, replacing any previous entry.
    pub fn insert(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl ParamValue,
    ) -> &mut Self {
        let name = name.into();
        let value: BoxedValue = Box::new(value);
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn ParamValue> {
        self.0
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, value)| value.deref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_ref())
    }

    pub fn values(&self) -> impl Iterator<Item = &dyn ParamValue> {
        self.0.iter().map(|(_, value)| value.deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Params
where
    N: Into<Cow<'static, str>>,
    V: ParamValue,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Read access to a case's resolved parameter and fixture values.
///
/// Selection never mutates a case; this is the narrow read interface a host
/// item type has to provide for grouping.
pub trait Parametrized {
    /// The resolved parametrization for this invocation, if any.
    fn params(&self) -> Option<&Params>;

    /// Resolved fixture values, consulted when no parametrization is present.
    fn fixtures(&self) -> Option<&Params>;
}
