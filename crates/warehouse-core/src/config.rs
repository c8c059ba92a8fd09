/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field `postgres_host` reads
/// `POSTGRES_HOST` and so on. Missing or unparsable variables are returned as
/// an error so `main` can exit non-zero.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of variables instead of the process env.
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
