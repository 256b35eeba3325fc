//! `define_port_error!` generates `thiserror` enums for port adapters along
//! with snake_case constructors that accept `impl Into<T>` for each field.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $( define_port_error!(@constructor $variant $( { $($field : $ty),* } )?); )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum StoreError {
            Offline => "store offline",
            Rejected { message: String } => "store rejected write: {message}",
            Retry { attempts: u32 } => "gave up after {attempts} attempts",
            Stale { message: String, version: u64 } => "stale {message} at version {version}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::offline(), StoreError::Offline);
        assert_eq!(StoreError::offline().to_string(), "store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StoreError::rejected("duplicate key");
        assert_eq!(err.to_string(), "store rejected write: duplicate key");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = StoreError::retry(3_u32);
        assert_eq!(err, StoreError::Retry { attempts: 3 });
    }

    #[test]
    fn mixed_fields_are_converted_in_order() {
        let err = StoreError::stale("blog", 7_u64);
        assert_eq!(err.to_string(), "stale blog at version 7");
    }
}
