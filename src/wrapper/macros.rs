/// Serialize a newtype as its inner value, and deserialize it back.
///
/// The two-type form wraps the inner value directly:
/// ```ignore
/// pub struct TweetID(pub i64);
///
/// derive_newtype_serde!(TweetID, i64);
/// ```
///
/// The checked form runs a fallible constructor and reports `$err_msg` when it
/// rejects the inner value:
/// ```ignore
/// derive_newtype_serde!(Srid, i32; Srid::try_new, "unsupported srid");
/// ```
#[macro_export]
macro_rules! derive_newtype_serde {
    ($t1:ty, $t2:ty; $fn:expr, $err_msg:expr) => {
        impl serde::Serialize for $t1 {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t1 {
            fn deserialize<D>(deserializer: D) -> std::result::Result<$t1, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let inner = <$t2 as serde::Deserialize>::deserialize(deserializer)?;
                $fn(inner).map_err(|_| <D::Error as serde::de::Error>::custom($err_msg))
            }
        }
    };

    ($t1:tt, $t2:ty) => {
        derive_newtype_serde!(_aux; $t1, $t2; $t1);
    };

    (_aux; $t1:ty, $t2:ty; $fn:expr) => {
        impl serde::Serialize for $t1 {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t1 {
            fn deserialize<D>(deserializer: D) -> std::result::Result<$t1, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Ok($fn(<$t2 as serde::Deserialize>::deserialize(deserializer)?))
            }
        }
    };
}
