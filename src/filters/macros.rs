/// Wire key of an option: the field name unless overridden with `as "key"`.
macro_rules! wire_key {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $key:literal) => {
        $key
    };
}

macro_rules! option_range {
    () => {
        None
    };
    ($min:literal, $max:literal) => {
        Some(($min as f64, $max as f64))
    };
}

/// Declares the option struct of one filter.
///
/// ```text
/// pub struct Name("wire_name", Kind)(required: Type, ...) {
///     field: Type [min, max],
///     field as "wire key": Type,
/// }
/// ```
macro_rules! filter_options {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($filter:literal, $media:ident)
        $( ( $( $(#[$rmeta:meta])* $req:ident $(as $rkey:literal)? : $rty:ty ),* $(,)? ) )?
        {
            $(
                $(#[$fmeta:meta])*
                $field:ident $(as $key:literal)? : $ty:ty $([$min:literal, $max:literal])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $($( $(#[$rmeta])* pub $req: $rty, )*)?
            $( $(#[$fmeta])* pub $field: Option<$ty>, )*
            /// Passthrough options not modelled above.
            pub extra: $crate::params::Params,
        }

        #[allow(clippy::new_without_default)]
        impl $name {
            pub fn new($($($req: impl Into<$rty>),*)?) -> Self {
                Self {
                    $($( $req: $req.into(), )*)?
                    $( $field: None, )*
                    extra: $crate::params::Params::new(),
                }
            }

            $(
                #[doc = concat!("Sets the `", wire_key!($field $(, $key)?), "` option.")]
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            /// Adds an option the binding does not model. Declared options win on key collision.
            pub fn extra(
                mut self,
                key: impl Into<String>,
                value: impl Into<$crate::value::Value>,
            ) -> Self {
                self.extra.set(key, value);
                self
            }
        }

        impl $crate::filters::FilterOptions for $name {
            const SPEC: &'static $crate::filters::FilterSpec = &$crate::filters::FilterSpec {
                name: $filter,
                media: $crate::stream::MediaKind::$media,
                options: &[
                    $($(
                        $crate::filters::OptionSpec {
                            field: stringify!($req),
                            key: wire_key!($req $(, $rkey)?),
                            range: None,
                            required: true,
                        },
                    )*)?
                    $(
                        $crate::filters::OptionSpec {
                            field: stringify!($field),
                            key: wire_key!($field $(, $key)?),
                            range: option_range!($($min, $max)?),
                            required: false,
                        },
                    )*
                ],
            };

            fn into_params(self) -> $crate::params::Params {
                let mut params = $crate::params::Params::new();
                $($(
                    params.declare(
                        wire_key!($req $(, $rkey)?),
                        Some($crate::value::Value::from(self.$req)),
                    );
                )*)?
                $(
                    params.declare(
                        wire_key!($field $(, $key)?),
                        self.$field.map($crate::value::Value::from),
                    );
                )*
                params.merge_extra(self.extra);
                params
            }
        }
    };
}

/// Declares an enumerated option and its wire tokens.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(token: &str) -> $crate::error::Result<Self> {
                match token {
                    $( $token => Ok($name::$variant), )*
                    other => Err($crate::error::Error::UnknownToken {
                        option: stringify!($name),
                        token: other.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for $crate::value::Value {
            fn from(value: $name) -> Self {
                $crate::value::Value::Str(value.as_str().to_string())
            }
        }
    };
}
