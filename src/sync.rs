#[cfg(feature = "std")]
#[derive(Default)]
pub struct Mutex<T>(std::sync::Mutex<T>);

#[cfg(feature = "std")]
impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    /// Locks the mutex, recovering the value if a previous holder panicked.
    pub fn lock(&self) -> std::sync::MutexGuard<'_, T> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub use spin::Mutex;

/// Replaces the guarded value, returning the previous one.
pub fn replace<T>(mutex: &Mutex<T>, value: T) -> T {
    core::mem::replace(&mut *mutex.lock(), value)
}
