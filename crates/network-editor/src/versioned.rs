// -------------------------------------------------------------------
// Versioned
// -------------------------------------------------------------------

/// Value with a counter bumped on every mutable access.
#[derive(Debug, Clone, Default)]
pub struct Versioned<T> {
    version: u64,
    data: T,
}
impl<T> Versioned<T> {
    pub fn new(data: T) -> Self {
        Self { version: 0, data }
    }
    pub fn get(&self) -> &T {
        &self.data
    }
    pub fn get_mut(&mut self) -> &mut T {
        self.version = self.version.wrapping_add(1);
        &mut self.data
    }
    pub fn set(&mut self, data: T) {
        self.data = data;
        self.version = self.version.wrapping_add(1);
    }
    /// Swap in `data` and return the previous value.
    pub fn replace(&mut self, data: T) -> T {
        self.version = self.version.wrapping_add(1);
        std::mem::replace(&mut self.data, data)
    }
    pub fn version(&self) -> u64 {
        self.version
    }
}

// -------------------------------------------------------------------
// Memoized
// -------------------------------------------------------------------

/// Derived value recomputed only when its key (usually a tuple of
/// source versions) changes.
pub struct Memoized<S, K, V> {
    version: u64,
    last: Option<(K, V)>,
    get_key: Box<dyn Fn(&S) -> K>,
    calc: Box<dyn Fn(&S) -> V>,
}

impl<S, K, V> Memoized<S, K, V>
where
    K: PartialEq,
{
    pub fn new(
        get_key: impl Fn(&S) -> K + 'static,
        calc: impl Fn(&S) -> V + 'static,
    ) -> Self {
        Self {
            version: 0,
            last: None,
            get_key: Box::new(get_key),
            calc: Box::new(calc),
        }
    }

    /// Recompute only if the key changed; return a reference to the cached value.
    pub fn get<'a>(&'a mut self, store: &S) -> &'a V {
        self.get_mut(store)
    }

    /// Mutable access to the cached value. Edits survive until the key
    /// changes.
    pub fn get_mut<'a>(&'a mut self, store: &S) -> &'a mut V {
        let key = (self.get_key)(store);
        if self.last.as_ref().is_some_and(|(k, _)| *k != key) {
            self.last = None;
        }

        let calc = &self.calc;
        let version = &mut self.version;
        let (_, value) = self.last.get_or_insert_with(|| {
            *version = version.wrapping_add(1);
            (key, calc(store))
        });
        value
    }

    /// Number of recomputations so far.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memoized_recomputes_on_version_change() {
        let mut source = Versioned::new(vec![1, 2, 3]);
        let mut total = Memoized::new(
            |s: &Versioned<Vec<i32>>| s.version(),
            |s: &Versioned<Vec<i32>>| s.get().iter().sum::<i32>(),
        );

        assert_eq!(*total.get(&source), 6);
        assert_eq!(*total.get(&source), 6);
        assert_eq!(total.version(), 1);

        source.get_mut().push(4);
        assert_eq!(*total.get(&source), 10);
        assert_eq!(total.version(), 2);

        let old = source.replace(vec![]);
        assert_eq!(old, [1, 2, 3, 4]);
        assert_eq!(*total.get(&source), 0);
        assert_eq!(total.version(), 3);
    }
}
