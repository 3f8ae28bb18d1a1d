/// rounds the given value `value` up to the nearest multiple
/// of `align`, saturating at the largest multiple that fits.
pub fn align_u64(value: u64, align: u64) -> u64 {
    if align == 0 {
        return value;
    }

    match value.checked_add(align - 1) {
        Some(x) => (x / align) * align,
        None => (u64::MAX / align) * align,
    }
}
