/// Helper macro for locking items
///
/// ```rust, ignore
///  let _guard = lock!(self.resolution);
///  // construct entities while holding the guard
/// ```
macro_rules! lock {
    ($lock:expr) => {
        $lock.lock().expect("Failed to acquire lock")
    };
}
