use std::error::Error as StdError;

type BoxedSource = Box<dyn StdError + Send + Sync>;

/// Failure during an RK4 run, tagged with which side produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model failed: {0}")]
    Model(#[source] BoxedSource),

    #[error("ODE problem failed: {0}")]
    Problem(#[source] BoxedSource),
}

impl Error {
    pub(crate) fn model(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Model(Box::new(source))
    }

    pub(crate) fn problem(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Problem(Box::new(source))
    }
}
