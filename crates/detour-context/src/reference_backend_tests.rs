//! Tests for NavigationContext running on the in-memory reference backend

#[cfg(test)]
mod tests {
    use crate::Vec3;

    use crate::memory::{NavMeshParams, StaticMeshSource};
    use crate::{
        AvoidanceConfig, AvoidanceConfigSet, Error, NavigationConfig, NavigationContext,
        ObstacleAvoidanceParams, Status,
    };

    fn reference_context(config: NavigationConfig) -> NavigationContext {
        let source = StaticMeshSource::new(NavMeshParams::default()).unwrap();
        NavigationContext::with_reference_backend(config)
            .with_mesh_source(source)
            .with_avoidance_configs(AvoidanceConfigSet::default())
    }

    #[test]
    fn test_full_lifecycle() {
        let mut context = reference_context(NavigationConfig::default());

        context.open().unwrap();
        assert!(context.is_active());

        let mesh = context.nav_mesh().cloned().unwrap();
        let query = context.shared_query().cloned().unwrap();
        let crowd = context.crowd().cloned().unwrap();

        assert_eq!(query.max_nodes(), 2048);
        assert_eq!(crowd.borrow().max_agents(), 10);
        assert_eq!(
            crowd.borrow().avoidance_config(2),
            Some(&ObstacleAvoidanceParams::good())
        );
        // crowd extents derive from the agent radius
        assert_eq!(context.default_extents(), Some(Vec3::new(1.0, 0.75, 1.0)));

        assert!(context.reset());
        assert!(mesh.is_disposed());
        assert!(query.is_disposed());
        assert!(crowd.borrow().is_disposed());
        assert!(!context.is_active());
    }

    #[test]
    fn test_query_bound_to_context_mesh() {
        let config = NavigationConfig::new(false).with_max_query_nodes(512);
        let mut context = reference_context(config);
        context.initialize().unwrap();

        let query = context.query().unwrap();
        let engine = query.borrow();
        assert_eq!(engine.max_nodes(), 512);

        assert!(std::rc::Rc::ptr_eq(
            engine.nav_mesh(),
            context.nav_mesh().unwrap()
        ));
    }

    #[test]
    fn test_oversized_node_pool_fails() {
        let config = NavigationConfig::new(false).with_max_query_nodes(70_000);
        let mut context = reference_context(config);

        assert_eq!(
            context.initialize(),
            Err(Error::QueryBuild(Status::InvalidParam))
        );
        assert!(context.nav_mesh().is_none());
    }

    #[test]
    fn test_empty_source_fails_until_baked() {
        let mut context = NavigationContext::with_reference_backend(NavigationConfig::new(false))
            .with_mesh_source(StaticMeshSource::empty());

        assert_eq!(context.initialize(), Err(Error::MissingNavMesh));

        let mut source = StaticMeshSource::empty();
        source.set_baked(NavMeshParams::default()).unwrap();
        context.set_mesh_source(source);
        assert!(context.initialize().is_ok());
    }

    #[test]
    fn test_no_mesh_source() {
        let mut context = NavigationContext::with_reference_backend(NavigationConfig::new(false));
        assert_eq!(context.initialize(), Err(Error::MissingNavMesh));

        let mut context = reference_context(NavigationConfig::new(false));
        context.initialize().unwrap();
        context.clear_mesh_source();

        // the existing set survives a failed rebuild
        assert_eq!(context.initialize(), Err(Error::MissingNavMesh));
        assert!(context.is_active());
    }

    #[test]
    fn test_partial_avoidance_set() {
        let mut context = reference_context(NavigationConfig::default());
        let mut configs = AvoidanceConfigSet::with_slot_count(2);
        configs.set(1, AvoidanceConfig::new("high", ObstacleAvoidanceParams::high()));
        context.set_avoidance_configs(Some(configs));
        context.initialize().unwrap();

        // slots past the configured ones keep the simulator's defaults
        let crowd = context.crowd().unwrap().borrow();
        assert_eq!(crowd.max_avoidance_params(), 8);
        assert_eq!(
            crowd.avoidance_config(1),
            Some(&ObstacleAvoidanceParams::high())
        );
        assert_eq!(
            crowd.avoidance_config(2),
            Some(&ObstacleAvoidanceParams::default())
        );
    }

    #[test]
    fn test_config_change_applies_on_next_initialize() {
        let mut context = reference_context(NavigationConfig::default());
        context.initialize().unwrap();
        assert!(context.crowd().is_some());

        context.config_mut().crowd_enabled = false;
        assert!(context.crowd().is_some());

        context.initialize().unwrap();
        assert!(context.crowd().is_none());
        assert_eq!(context.default_extents(), Some(Vec3::ONE));
        assert_eq!(context.stats().initializations, 2);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_context_from_json_config() {
        let config = NavigationConfig::from_json(
            r#"{ "crowd_enabled": false, "max_query_nodes": 1024 }"#,
        )
        .unwrap();
        let mut context = reference_context(config);
        context.open().unwrap();

        assert!(context.crowd().is_none());
        assert_eq!(context.shared_query().unwrap().max_nodes(), 1024);
    }
}
