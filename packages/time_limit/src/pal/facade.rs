//! Platform facade for switching between real and test implementations.

#[cfg(test)]
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use crate::pal::{FakePlatform, MockPlatform};
use crate::pal::{Platform, RealPlatform};

#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    Real(RealPlatform),

    #[cfg(test)]
    Fake(FakePlatform),

    #[cfg(test)]
    Mock(Arc<MockPlatform>),
}

impl PlatformFacade {
    pub(crate) const fn real() -> Self {
        Self::Real(RealPlatform)
    }
}

impl Platform for PlatformFacade {
    fn monotonic_nanos(&self) -> u64 {
        match self {
            Self::Real(platform) => platform.monotonic_nanos(),
            #[cfg(test)]
            Self::Fake(platform) => platform.monotonic_nanos(),
            #[cfg(test)]
            Self::Mock(platform) => platform.monotonic_nanos(),
        }
    }

    fn process_time(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.process_time(),
            #[cfg(test)]
            Self::Fake(platform) => platform.process_time(),
            #[cfg(test)]
            Self::Mock(platform) => platform.process_time(),
        }
    }

    fn thread_time(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.thread_time(),
            #[cfg(test)]
            Self::Fake(platform) => platform.thread_time(),
            #[cfg(test)]
            Self::Mock(platform) => platform.thread_time(),
        }
    }
}

#[cfg(test)]
impl From<FakePlatform> for PlatformFacade {
    fn from(platform: FakePlatform) -> Self {
        Self::Fake(platform)
    }
}

#[cfg(test)]
impl From<MockPlatform> for PlatformFacade {
    fn from(platform: MockPlatform) -> Self {
        Self::Mock(Arc::new(platform))
    }
}
