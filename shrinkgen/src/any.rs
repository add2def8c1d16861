//! Type-erased generated values.

use std::any::Any as StdAny;
use std::fmt;
use std::rc::Rc;

use crate::error::GenError;

trait ErasedValue {
    fn as_any(&self) -> &dyn StdAny;
    fn type_name(&self) -> &'static str;
    fn describe(&self) -> String;
}

struct ValueHolder<T>(T);

impl<T: fmt::Debug + 'static> ErasedValue for ValueHolder<T> {
    fn as_any(&self) -> &dyn StdAny {
        &self.0
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn describe(&self) -> String {
        format!("{:?}", self.0)
    }
}

/// A generated value of any `Debug` type.
///
/// Lets picks of different types live side by side in one recipe. Values are
/// immutable once erased, so clones share the same allocation.
#[derive(Clone)]
pub struct Any {
    value: Rc<dyn ErasedValue>,
}

impl Any {
    pub fn new<T: fmt::Debug + 'static>(value: T) -> Self {
        Self {
            value: Rc::new(ValueHolder(value)),
        }
    }

    /// Borrow the value as a `T`, failing if it holds something else
    pub fn get<T: 'static>(&self) -> Result<&T, GenError> {
        self.value.as_any().downcast_ref::<T>().ok_or_else(|| {
            GenError::type_mismatch(std::any::type_name::<T>(), self.value.type_name())
        })
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.value.as_any().is::<T>()
    }

    /// Name of the held type
    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    /// Held type name and `Debug` rendering of the value
    pub fn describe(&self) -> (&'static str, String) {
        (self.value.type_name(), self.value.describe())
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.value.type_name(), self.value.describe())
    }
}
