//! Helper macro generating port error enums with snake_case constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ExampleStoreError {
            Connection { message: String } => "store unreachable: {message}",
            InvalidId { id: String } => "malformed id: {id}",
            Retry { attempts: u32 } => "gave up after {attempts}",
            Partial { message: String, written: u64 } => "{message} ({written} written)",
            Duplicate => "record already exists",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(
            ExampleStoreError::connection("refused").to_string(),
            "store unreachable: refused"
        );
        assert_eq!(
            ExampleStoreError::invalid_id("zz"),
            ExampleStoreError::InvalidId { id: "zz".into() }
        );
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        assert_eq!(ExampleStoreError::retry(3_u32).to_string(), "gave up after 3");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExampleStoreError::partial("aborted", 2_u64);
        assert_eq!(err.to_string(), "aborted (2 written)");
    }

    #[test]
    fn unit_variants_get_argument_free_constructors() {
        assert_eq!(ExampleStoreError::duplicate(), ExampleStoreError::Duplicate);
        assert_eq!(ExampleStoreError::duplicate().to_string(), "record already exists");
    }
}
