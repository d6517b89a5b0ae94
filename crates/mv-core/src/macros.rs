//! Internal declarative macros shared by the flag and id modules.

/// Generate a bit-set newtype over a primitive integer with named constants.
///
/// The generated type is `Copy`, compares by value, and offers the small set
/// of operations the motion code needs: `contains` (all bits), `intersects`
/// (any bit), `insert`, `remove`, and `set`.
macro_rules! flag_set {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident($inner:ty) {
            $( $(#[$fattr:meta])* const $flag:ident = $value:expr; )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            pub const EMPTY: $name = $name(0);
            $( $(#[$fattr])* pub const $flag: $name = $name($value); )*

            #[inline(always)]
            pub const fn bits(self) -> $inner {
                self.0
            }

            #[inline(always)]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// `true` if every bit of `other` is set in `self`.
            #[inline(always)]
            pub const fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }

            /// `true` if any bit of `other` is set in `self`.
            #[inline(always)]
            pub const fn intersects(self, other: $name) -> bool {
                self.0 & other.0 != 0
            }

            #[inline(always)]
            pub fn insert(&mut self, other: $name) {
                self.0 |= other.0;
            }

            #[inline(always)]
            pub fn remove(&mut self, other: $name) {
                self.0 &= !other.0;
            }

            /// Insert `other` when `on`, remove it otherwise.
            #[inline(always)]
            pub fn set(&mut self, other: $name, on: bool) {
                if on { self.insert(other) } else { self.remove(other) }
            }
        }

        impl std::ops::BitOr for $name {
            type Output = $name;
            #[inline(always)]
            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            #[inline(always)]
            fn bitor_assign(&mut self, rhs: $name) {
                self.0 |= rhs.0;
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut first = true;
                write!(f, "{}(", stringify!($name))?;
                $(
                    if $value != 0 && self.contains($name::$flag) {
                        if !first { f.write_str(" | ")?; }
                        f.write_str(stringify!($flag))?;
                        first = false;
                    }
                )*
                if first { f.write_str("EMPTY")?; }
                f.write_str(")")
            }
        }
    };
}
