//! Path-based destination classification.

use crate::registry::Role;

/// Route a relative path to a destination category.
///
/// Case-sensitive substring match: `Provider` wins, then `use`, otherwise
/// the file is a component. Anything containing `use` (`users/List.tsx`)
/// lands in hooks; descriptors that declare hook/provider paths avoid the
/// heuristic entirely.
pub fn classify_path(path: &str) -> Role {
    if path.contains("Provider") {
        Role::Provider
    } else if path.contains("use") {
        Role::Hook
    } else {
        Role::Component
    }
}
