/// Declares a string-backed identifier enum.
///
/// Every listed variant has a wire id (used for serde and parsing) and a
/// display name. Unknown ids deserialize into `Custom(String)` so that
/// user-authored values round-trip unchanged.
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire_id:literal : $display_name:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            Custom(String),
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_id(&s))
            }
        }

        impl $enum_name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $wire_id,
                    )*
                    Self::Custom(id) => id,
                }
            }

            pub fn from_id(id: &str) -> Self {
                match id {
                    $(
                        $wire_id => Self::$variant,
                    )*
                    _ => Self::Custom(id.to_string()),
                }
            }

            pub fn name(&self) -> String {
                match self {
                    $(
                        Self::$variant => $display_name.to_string(),
                    )*
                    Self::Custom(id) => id.clone(),
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
