use crate::req_type::{InertiaRequestType, PartialComponent};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

type PropResolver = Arc<dyn Fn() -> Value + Send + Sync>;

#[derive(Clone)]
pub enum InertiaProp {
    /// - ALWAYS included on standard visits
    /// - OPTIONALLY included on partial reloads
    /// - ALWAYS evaluated
    Data(Value),
    /// - ALWAYS included on standard visits
    /// - OPTIONALLY included on partial reloads
    /// - ONLY evaluated when included
    Lazy(PropResolver),
    /// - ALWAYS included on standard visits
    /// - ALWAYS included on partial reloads (even if not requested or excepted)
    /// - ALWAYS evaluated
    Always(Value),
    /// - NEVER included on standard visits
    /// - OPTIONALLY included on partial reloads
    /// - ONLY evaluated when needed
    Demand(PropResolver),
}

pub type InertiaProps = HashMap<String, InertiaProp>;

impl InertiaProp {
    pub fn lazy<F>(resolver: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        InertiaProp::Lazy(Arc::new(resolver))
    }

    pub fn demand<F>(resolver: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        InertiaProp::Demand(Arc::new(resolver))
    }

    /// Filters `raw_props` for the given visit and evaluates what is left. Filtering
    /// happens first, so producers of props that are not sent are never called.
    pub(crate) fn resolve_props(
        raw_props: InertiaProps,
        req_type: &InertiaRequestType,
    ) -> Map<String, Value> {
        let mut props = Map::new();

        let partials = match req_type.partials() {
            None => {
                for (key, value) in raw_props.into_iter() {
                    if let InertiaProp::Demand(_) = value {
                        continue;
                    }

                    props.insert(key, value.resolve_prop_unconditionally());
                }

                return props;
            }
            Some(partials) => partials,
        };

        for (key, value) in raw_props.into_iter() {
            match value {
                InertiaProp::Always(value) => {
                    props.insert(key, value);
                }
                value => {
                    if Self::should_be_pushed(&key, partials) {
                        props.insert(key, value.resolve_prop_unconditionally());
                    }
                }
            };
        }

        props
    }

    #[inline]
    fn resolve_prop_unconditionally(self) -> Value {
        match self {
            InertiaProp::Always(value) => value,
            InertiaProp::Data(value) => value,
            InertiaProp::Demand(resolver) => resolver(),
            InertiaProp::Lazy(resolver) => resolver(),
        }
    }

    #[inline]
    fn should_be_pushed(key: &String, partial: &PartialComponent) -> bool {
        partial.only.contains(key) || partial.only.is_empty() && !partial.except.contains(key)
    }
}

impl From<Value> for InertiaProp {
    fn from(value: Value) -> Self {
        InertiaProp::Data(value)
    }
}

#[cfg(test)]
mod test {
    use super::{InertiaProp, InertiaProps};
    use crate::req_type::{InertiaRequestType, PartialComponent};
    use crate::Component;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn partial(only: &[&str], except: &[&str]) -> InertiaRequestType {
        InertiaRequestType::Partial(PartialComponent {
            component: Component("Index".into()),
            only: only.iter().map(|key| key.to_string()).collect(),
            except: except.iter().map(|key| key.to_string()).collect(),
        })
    }

    #[test]
    fn lazy_props_are_resolved_on_standard_visits() {
        let mut props = InertiaProps::new();
        props.insert("a".into(), InertiaProp::Data("1".into()));
        props.insert("b".into(), InertiaProp::lazy(|| "2".into()));
        props.insert("c".into(), InertiaProp::demand(|| "3".into()));

        let resolved = InertiaProp::resolve_props(props, &InertiaRequestType::Standard);

        assert_eq!(json!(resolved), json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn unrequested_lazy_props_are_never_evaluated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_to_move = Arc::clone(&calls);

        let mut props = InertiaProps::new();
        props.insert("a".into(), InertiaProp::Data("1".into()));
        props.insert(
            "b".into(),
            InertiaProp::lazy(move || {
                calls_to_move.fetch_add(1, Ordering::SeqCst);
                "2".into()
            }),
        );

        let resolved = InertiaProp::resolve_props(props, &partial(&["a"], &[]));

        assert_eq!(json!(resolved), json!({"a": "1"}));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn always_props_survive_partial_reloads() {
        let mut props = InertiaProps::new();
        props.insert("auth".into(), InertiaProp::Always(json!({"name": "John"})));
        props.insert("events".into(), InertiaProp::Data(json!([1, 2])));
        props.insert("stats".into(), InertiaProp::demand(|| json!({"visits": 9})));

        let resolved = InertiaProp::resolve_props(props.clone(), &partial(&["stats"], &[]));
        assert_eq!(
            json!(resolved),
            json!({"auth": {"name": "John"}, "stats": {"visits": 9}})
        );

        let resolved = InertiaProp::resolve_props(props, &partial(&[], &["events"]));
        assert_eq!(
            json!(resolved),
            json!({"auth": {"name": "John"}, "stats": {"visits": 9}})
        );
    }
}
