use super::{config::Config, emitter::{Emitter, Payload}};
use crate::error::PodiumError;
use crate::events::Registration;

/// Builder for an [`Emitter`] with a custom configuration and initial events.
pub struct EmitterBuilder<T> {
    cfg: Config,
    events: Vec<Registration<T>>,
}

impl<T: Payload> EmitterBuilder<T> {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            events: Vec::new(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the name used in logs.
    pub fn with_name(mut self, name: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        self.cfg.name = name.into();
        self
    }

    /// Adds initial events (or source emitters).
    pub fn with_events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Registration<T>>,
    {
        self.events.extend(events.into_iter().map(Into::into));
        self
    }

    /// Adds source emitters linked into the new emitter.
    pub fn with_podiums<'a, I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = &'a Emitter<T>>,
    {
        self.events
            .extend(sources.into_iter().map(|s| Registration::Podium(s.clone())));
        self
    }

    /// Builds the emitter and registers everything collected so far.
    ///
    /// Fails like [`Emitter::register_event`] (duplicate or empty names).
    pub fn build(self) -> Result<Emitter<T>, PodiumError> {
        let emitter = Emitter::with_config(self.cfg);
        emitter.register_event(self.events)?;
        Ok(emitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_sources() {
        let worker: Emitter<u32> = Emitter::with_events(["job", "idle"]).unwrap();
        let sup: Emitter<u32> = EmitterBuilder::new(Config::named("supervisor"))
            .with_events(["shutdown"])
            .with_podiums([&worker])
            .build()
            .unwrap();

        assert_eq!(sup.name(), "supervisor");
        assert_eq!(sup.event_names(), vec!["idle", "job", "shutdown"]);
    }

    #[test]
    fn test_build_fails_on_duplicates() {
        let err = Emitter::<u32>::builder()
            .with_events(["a"])
            .with_events(["a"])
            .build()
            .unwrap_err();
        assert_eq!(err.as_label(), "podium_duplicate_event");
    }

    #[test]
    fn test_with_config_overrides() {
        let cfg = Config {
            queue_capacity: 0,
            ..Config::named("tiny")
        };
        let emitter: Emitter<u32> = Emitter::builder().with_config(cfg).build().unwrap();
        assert_eq!(emitter.name(), "tiny");
        assert_eq!(emitter.config().queue_capacity_clamped(), 1);
    }
}
