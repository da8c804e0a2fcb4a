use core::convert::Infallible;

/// Persistence seam for leaderboards and profiles. The host decides the format.
pub trait Store<T> {
    type Error;

    /// The stored value, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<T>, Self::Error>;

    fn save(&mut self, value: &T) -> Result<(), Self::Error>;

    /// Loads (or defaults), applies `f`, then saves.
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R, Self::Error>
    where
        T: Default,
    {
        let mut value = self.load()?.unwrap_or_default();
        let output = f(&mut value);
        self.save(&value)?;
        Ok(output)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryStore<T> {
    value: Option<T>,
}

impl<T> MemoryStore<T> {
    pub fn new(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    type Error = Infallible;

    fn load(&self) -> Result<Option<T>, Self::Error> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &T) -> Result<(), Self::Error> {
        self.value = Some(value.clone());
        Ok(())
    }
}
