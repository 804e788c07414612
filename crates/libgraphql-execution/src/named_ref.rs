use crate::loc::SourceLocation;
use std::marker::PhantomData;

/// Represents a strongly-typed, `String`-named reference to a "resource"
/// (`TResource`) stored within some other data-store (`TSource`) without
/// holding an explicit reference to the data-store. De-referencing a
/// [`NamedRef`] is done via [`NamedRef::deref()`] by providing an explicit
/// reference to the `TSource`.
///
/// Document parts use these to point at schema types, directive definitions,
/// variable declarations and named fragments. A reference may be created
/// before its target exists (e.g. a fragment spread that appears before the
/// fragment definition) and only resolved during a later linking pass.
pub struct NamedRef<TSource, TResource: DerefByName<Source = TSource>> {
    name: String,
    phantom: PhantomData<fn() -> TResource>,
    ref_location: SourceLocation,
}
impl<TSource, TResource: DerefByName<Source = TSource>> NamedRef<TSource, TResource> {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn new(
        name: impl AsRef<str>,
        ref_location: SourceLocation,
    ) -> NamedRef<TSource, TResource> {
        NamedRef {
            name: name.as_ref().to_string(),
            phantom: PhantomData,
            ref_location,
        }
    }

    pub fn ref_location(&self) -> &SourceLocation {
        &self.ref_location
    }

    pub fn deref<'a>(
        &self,
        source: &'a TSource,
    ) -> Result<&'a TResource, DerefByNameError> {
        TResource::deref_name(source, self.name.as_str())
    }
}

// Manual impls so that neither `TSource` nor `TResource` need to implement
// these traits themselves.
impl<TSource, TResource: DerefByName<Source = TSource>> Clone for NamedRef<TSource, TResource> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            phantom: PhantomData,
            ref_location: self.ref_location,
        }
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> std::fmt::Debug for NamedRef<TSource, TResource> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedRef")
            .field("name", &self.name)
            .field("ref_location", &self.ref_location)
            .finish()
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> PartialEq for NamedRef<TSource, TResource> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ref_location == other.ref_location
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> Eq for NamedRef<TSource, TResource> {}

/// Implement this trait for any type that could be referenced by name. This
/// will enable usage of [`NamedRef<T>`] for that type.
pub trait DerefByName: Sized {
    type Source;

    fn deref_name<'a>(
        source: &'a Self::Source,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError>;

    fn named_ref(
        name: &str,
        ref_location: SourceLocation,
    ) -> NamedRef<Self::Source, Self> {
        NamedRef::new(name, ref_location)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DerefByNameError {
    #[error("No definition named `{0}` could be found")]
    DanglingReference(String),
}
