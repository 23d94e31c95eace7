use std::collections::HashMap;

use serde::Serialize;

use crate::{MealCategory, MealTimeResolver, ResolveError, ResolvedTimestamp, parse_date_field};

/// Receives a resolved meal time, typically a form field about to be submitted.
pub trait TimestampSink {
    fn write(&mut self, timestamp: &ResolvedTimestamp) -> Result<(), ResolveError>;
}

/// Hidden fields of the "log a previous day" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormFields {
    pub eaten_at: Option<String>,
}

impl TimestampSink for FormFields {
    fn write(&mut self, timestamp: &ResolvedTimestamp) -> Result<(), ResolveError> {
        self.eaten_at = Some(timestamp.to_iso_string()?);
        Ok(())
    }
}

impl TimestampSink for Vec<ResolvedTimestamp> {
    fn write(&mut self, timestamp: &ResolvedTimestamp) -> Result<(), ResolveError> {
        self.push(*timestamp);
        Ok(())
    }
}

/// Outcome of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The date field was empty; nothing was resolved or written.
    Skipped,
    Written(ResolvedTimestamp),
}

/// Routes meal button presses to the resolver and the sink.
///
/// Each category is reachable through a trigger id equal to its name
/// (`"breakfast"`, ...); more ids can be mapped with [`with_trigger`].
///
/// [`with_trigger`]: MealTimeDispatcher::with_trigger
pub struct MealTimeDispatcher<S> {
    resolver: MealTimeResolver,
    triggers: HashMap<String, MealCategory>,
    sink: S,
}

impl<S: TimestampSink> MealTimeDispatcher<S> {
    pub fn new(resolver: MealTimeResolver, sink: S) -> Self {
        let triggers = MealCategory::all()
            .iter()
            .map(|category| (category.to_string(), *category))
            .collect();

        Self {
            resolver,
            triggers,
            sink,
        }
    }

    pub fn with_trigger(mut self, id: impl Into<String>, category: MealCategory) -> Self {
        self.triggers.insert(id.into(), category);
        self
    }

    pub fn resolver(&self) -> &MealTimeResolver {
        &self.resolver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handle a press of the button `trigger_id` with the current value of
    /// the date field.
    ///
    /// The sink is only written when a timestamp was resolved.
    #[tracing::instrument(skip(self))]
    pub fn trigger(&mut self, raw_date: &str, trigger_id: &str) -> Result<Dispatch, ResolveError> {
        let Some(date) = parse_date_field(raw_date)? else {
            tracing::debug!("Date field is empty, skipping");
            return Ok(Dispatch::Skipped);
        };

        let Some(category) = self.triggers.get(trigger_id).copied() else {
            tracing::warn!("No meal category mapped to trigger");
            return Err(ResolveError::UnknownCategory(trigger_id.to_owned()));
        };

        let timestamp = self.resolver.resolve(date, category)?;
        self.sink.write(&timestamp)?;

        Ok(Dispatch::Written(timestamp))
    }
}
