//! Final-observer ordering.
//!
//! The visualizer has to see what every other plugin did to a module, so it
//! must be the last entry of the host's plugin list. Declaring
//! [`PluginPhase::Post`](crate::PluginPhase::Post) only places it among the
//! post plugins; [`force_last`] moves it behind those as well.
//!
//! The move happens once, from `config_resolved`, before any module is
//! transformed. Hook order within a single module's chain is what counts;
//! there is no ordering across modules.

use tracing::debug;

use crate::pipeline::PluginList;
use crate::{Error, Result};

/// Move the plugin named `name` to the end of `plugins`.
///
/// Fails with [`Error::PluginNotFound`] when no plugin has that name and
/// with [`Error::DuplicatePlugin`] when more than one does. Both leave the
/// list untouched.
pub fn force_last(plugins: &mut PluginList, name: &str) -> Result<()> {
    let Some(index) = plugins.position(name) else {
        return Err(Error::PluginNotFound {
            name: name.to_string(),
        });
    };

    let count = plugins.count(name);
    if count > 1 {
        return Err(Error::DuplicatePlugin {
            name: name.to_string(),
            count,
        });
    }

    let plugin = plugins.remove(index);
    plugins.push(plugin);

    debug!(plugin = name, from = index, to = plugins.len() - 1, "moved plugin to end of list");
    Ok(())
}

/// Whether the last plugin in `plugins` is named `name`.
pub fn is_last(plugins: &PluginList, name: &str) -> bool {
    plugins.last().is_some_and(|plugin| plugin.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Plugin, PluginPhase, SharedPlugin};
    use async_trait::async_trait;
    use std::borrow::Cow;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Named(String, PluginPhase);

    #[async_trait]
    impl Plugin for Named {
        fn name(&self) -> Cow<'static, str> {
            self.0.clone().into()
        }

        fn phase(&self) -> PluginPhase {
            self.1
        }
    }

    fn named(name: &str, phase: PluginPhase) -> SharedPlugin {
        Arc::new(Named(name.to_string(), phase))
    }

    const PHASES: [PluginPhase; 3] = [PluginPhase::Pre, PluginPhase::Normal, PluginPhase::Post];

    #[test]
    fn test_force_last_for_any_number_of_plugins() {
        for others in 0..8 {
            for offset in 0..=others {
                let mut plugins = PluginList::new();
                for i in 0..others {
                    plugins.push(named(&format!("other-{i}"), PHASES[(i + offset) % 3]));
                }
                plugins.push(named("observer", PluginPhase::Post));
                plugins.sort_by_phase();

                force_last(&mut plugins, "observer").unwrap();

                assert!(is_last(&plugins, "observer"), "{plugins:?}");
                assert_eq!(plugins.len(), others + 1);
            }
        }
    }

    #[test]
    fn test_force_last_keeps_relative_order_of_others() {
        let mut plugins: PluginList = [
            named("a", PluginPhase::Pre),
            named("observer", PluginPhase::Post),
            named("b", PluginPhase::Post),
            named("c", PluginPhase::Post),
        ]
        .into_iter()
        .collect();

        force_last(&mut plugins, "observer").unwrap();
        assert_eq!(plugins.names(), ["a", "b", "c", "observer"]);
    }

    #[test]
    fn test_force_last_when_already_last() {
        let mut plugins: PluginList = [named("a", PluginPhase::Normal), named("observer", PluginPhase::Post)]
            .into_iter()
            .collect();

        force_last(&mut plugins, "observer").unwrap();
        assert_eq!(plugins.names(), ["a", "observer"]);
    }

    #[test]
    fn test_missing_plugin_is_an_error() {
        let mut plugins: PluginList = [named("a", PluginPhase::Normal)].into_iter().collect();

        let err = force_last(&mut plugins, "observer").unwrap_err();
        assert!(matches!(err, Error::PluginNotFound { ref name } if name == "observer"));
        assert_eq!(plugins.names(), ["a"]);

        let mut empty = PluginList::new();
        assert!(matches!(
            force_last(&mut empty, "observer"),
            Err(Error::PluginNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_plugin_is_an_error() {
        let mut plugins: PluginList = [
            named("observer", PluginPhase::Post),
            named("a", PluginPhase::Normal),
            named("observer", PluginPhase::Post),
        ]
        .into_iter()
        .collect();

        let err = force_last(&mut plugins, "observer").unwrap_err();
        assert!(matches!(err, Error::DuplicatePlugin { count: 2, .. }));
        assert_eq!(plugins.names(), ["observer", "a", "observer"]);
    }

    #[test]
    fn test_is_last() {
        assert!(!is_last(&PluginList::new(), "observer"));

        let plugins: PluginList = [named("observer", PluginPhase::Post), named("a", PluginPhase::Normal)]
            .into_iter()
            .collect();
        assert!(!is_last(&plugins, "observer"));
        assert!(is_last(&plugins, "a"));
    }
}
