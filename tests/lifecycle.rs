//! End-to-end lifecycle of a map tree: mount, prop updates, unmount.

use std::rc::Rc;

use serde_json::json;
use spark_map::engine::{attached_count, attached_count_on};
use spark_map::{
    Cleanup, FullScreenProps, MapConfig, MapContext, MapEvent, MapJournal, MapMount, MapProps,
    MemoryMap, PropValue, TileLayerProps, VectorLayerProps, VectorSource, controls,
    full_screen_control, layers, map_container, mount_config, reset_registry, show, tile_layer,
    vector_layer,
};
use spark_signals::signal;

const CENTER: (f64, f64) = (-94.9065, 38.9884);

fn counties() -> VectorSource {
    VectorSource::Url("data/kansas-counties.geojson".into())
}

fn towns() -> VectorSource {
    VectorSource::GeoJson(json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-95.2353, 38.9717] },
            "properties": {}
        }]
    }))
}

fn mount(journal: &MapJournal, children: spark_map::Children) -> MapMount {
    map_container(MapProps {
        center: CENTER.into(),
        zoom: 9.0.into(),
        factory: Some(MemoryMap::factory(journal.clone())),
        children: Some(children),
        ..Default::default()
    })
    .unwrap()
}

// =============================================================================
// Mount / unmount
// =============================================================================

#[test]
fn test_three_layers_attach_in_order() {
    reset_registry();
    let journal = MapJournal::new();

    let mount = mount(
        &journal,
        Box::new(|ctx| {
            vec![layers(|| {
                vec![
                    tile_layer(ctx, TileLayerProps::default()),
                    vector_layer(ctx, VectorLayerProps {
                        source: counties(),
                        z_index: Some(1.into()),
                        ..Default::default()
                    }),
                    vector_layer(ctx, VectorLayerProps {
                        source: towns(),
                        z_index: Some(2.into()),
                        ..Default::default()
                    }),
                ]
            })]
        }),
    );
    let map = mount.map().unwrap();

    assert_eq!(journal.maps_created(), 1);
    assert_eq!(journal.attaches(), 3);
    assert_eq!(journal.detaches(), 0);

    let added = journal.layers_added();
    map.with(|m| {
        let ids: Vec<_> = m.layers().iter().map(|l| l.id()).collect();
        assert_eq!(ids, added, "attached in mount order");

        let z: Vec<i32> = m.layers().iter().map(|l| l.z_index()).collect();
        assert_eq!(z, vec![0, 1, 2]);
        assert!(m.layers()[0].is_tile());
        assert!(m.layers()[1].is_vector());
    });
    assert_eq!(attached_count_on(map.id()), 3);

    mount.unmount().unwrap();
    assert_eq!(journal.detaches(), 3);
    assert_eq!(attached_count(), 0);
    assert!(map.with(|m| m.layers().is_empty()));
}

#[test]
fn test_every_attach_has_one_detach() {
    reset_registry();
    let journal = MapJournal::new();
    let shown = signal(true);
    let shown_for_tree = shown.clone();

    let mount = mount(
        &journal,
        Box::new(move |ctx| {
            vec![
                layers(|| {
                    vec![
                        tile_layer(ctx, TileLayerProps::default()),
                        vector_layer(ctx, VectorLayerProps {
                            source: counties(),
                            visible: Some(shown_for_tree.into()),
                            ..Default::default()
                        }),
                    ]
                }),
                controls(|| vec![full_screen_control(ctx, FullScreenProps::default())]),
            ]
        }),
    );

    for _ in 0..5 {
        shown.set(false);
        shown.set(true);
    }
    mount.unmount().unwrap();

    assert_eq!(journal.attaches(), 8);
    assert_eq!(journal.attaches(), journal.detaches());
    assert_eq!(attached_count(), 0);
}

#[test]
fn test_binders_outliving_container() {
    reset_registry();
    let journal = MapJournal::new();
    let ctx = MapContext::new();

    let mount = map_container(MapProps {
        center: CENTER.into(),
        zoom: 9.0.into(),
        factory: Some(MemoryMap::factory(journal.clone())),
        context: Some(ctx.clone()),
        ..Default::default()
    })
    .unwrap();

    let tile = tile_layer(&ctx, TileLayerProps::default());
    let fullscreen = full_screen_control(&ctx, FullScreenProps::default());
    assert_eq!(journal.attaches(), 2);

    mount.unmount().unwrap();
    assert!(ctx.map().is_none());
    assert_eq!(attached_count(), 0, "bookkeeping cleared with the map");

    tile();
    fullscreen();
    assert_eq!(journal.detaches(), 0, "nothing detached from a released map");
}

#[test]
fn test_binder_waits_for_container() {
    reset_registry();
    let journal = MapJournal::new();
    let ctx = MapContext::new();

    let tile = tile_layer(&ctx, TileLayerProps::default());
    assert_eq!(journal.attaches(), 0);

    let mount = map_container(MapProps {
        factory: Some(MemoryMap::factory(journal.clone())),
        context: Some(ctx.clone()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(journal.attaches(), 1);

    tile();
    assert_eq!(journal.detaches(), 1);
    drop(mount);
}

// =============================================================================
// Prop updates
// =============================================================================

#[test]
fn test_zoom_change_reuses_instance() {
    reset_registry();
    let journal = MapJournal::new();
    let zoom = signal(9.0);

    let mount = map_container(MapProps {
        center: CENTER.into(),
        zoom: zoom.clone().into(),
        factory: Some(MemoryMap::factory(journal.clone())),
        children: Some(Box::new(|ctx| vec![tile_layer(ctx, TileLayerProps::default())])),
        ..Default::default()
    })
    .unwrap();
    let before = mount.map().unwrap();

    zoom.set(10.0);
    zoom.set(40.0);

    let after = mount.map().unwrap();
    assert_eq!(before, after);
    assert_eq!(after.with(|m| m.view().zoom()), 28.0, "clamped to the view's range");
    assert_eq!(journal.maps_created(), 1);
    assert_eq!(journal.attaches(), 1, "layers untouched by zoom");
    assert_eq!(journal.count(|e| matches!(e, MapEvent::ViewChanged { .. })), 2);
}

#[test]
fn test_z_index_reapplied_in_place() {
    reset_registry();
    let journal = MapJournal::new();
    let z = signal(1);
    let z_for_tree = z.clone();

    let mount = mount(
        &journal,
        Box::new(move |ctx| {
            vec![
                tile_layer(ctx, TileLayerProps::default()),
                vector_layer(ctx, VectorLayerProps {
                    source: counties(),
                    z_index: Some(z_for_tree.into()),
                    ..Default::default()
                }),
            ]
        }),
    );
    let map = mount.map().unwrap();
    let vector_id = map.with(|m| m.layers()[1].id());

    z.set(-1);

    map.with(|m| {
        assert_eq!(m.layers()[1].id(), vector_id, "same layer object");
        assert_eq!(m.layers()[1].z_index(), -1);
        assert_eq!(m.render_order()[0], vector_id);
    });
    assert_eq!(journal.attaches(), 2);
    assert_eq!(journal.detaches(), 0);
}

#[test]
fn test_getter_visibility_follows_zoom() {
    reset_registry();
    let journal = MapJournal::new();
    let zoom = signal(9.0);
    let zoom_for_tree = zoom.clone();

    let mount = map_container(MapProps {
        zoom: zoom.clone().into(),
        factory: Some(MemoryMap::factory(journal.clone())),
        children: Some(Box::new(move |ctx| {
            vec![vector_layer(ctx, VectorLayerProps {
                source: towns(),
                visible: Some(PropValue::Getter(Rc::new(move || zoom_for_tree.get() >= 10.0))),
                ..Default::default()
            })]
        })),
        ..Default::default()
    })
    .unwrap();
    let map = mount.map().unwrap();
    assert!(map.with(|m| m.layers().is_empty()));

    zoom.set(11.0);
    assert_eq!(map.with(|m| m.layers().len()), 1);

    zoom.set(12.0);
    assert_eq!(journal.attaches(), 1, "still shown, not re-attached");

    zoom.set(8.0);
    assert!(map.with(|m| m.layers().is_empty()));
}

#[test]
fn test_show_mounts_and_unmounts_layer() {
    reset_registry();
    let journal = MapJournal::new();
    let enabled = signal(false);
    let enabled_for_tree = enabled.clone();

    let mount = mount(
        &journal,
        Box::new(move |ctx| {
            let ctx = ctx.clone();
            vec![show(
                move || enabled_for_tree.get(),
                move || vector_layer(&ctx, VectorLayerProps::default()),
                None::<fn() -> Cleanup>,
            )]
        }),
    );
    assert_eq!(journal.attaches(), 0);

    enabled.set(true);
    assert_eq!(journal.attaches(), 1);

    enabled.set(false);
    assert_eq!(journal.detaches(), 1);

    enabled.set(true);
    mount.unmount().unwrap();
    assert_eq!(journal.attaches(), 2);
    assert_eq!(journal.detaches(), 2);
}

// =============================================================================
// Remount and config
// =============================================================================

#[test]
fn test_remount_moves_binders_to_new_instance() {
    reset_registry();
    let journal = MapJournal::new();

    let mut mount = mount(
        &journal,
        Box::new(|ctx| {
            vec![
                tile_layer(ctx, TileLayerProps::default()),
                full_screen_control(ctx, FullScreenProps::default()),
            ]
        }),
    );
    let first = mount.map().unwrap();

    mount.remount().unwrap();
    let second = mount.map().unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(attached_count_on(first.id()), 0);
    assert_eq!(attached_count_on(second.id()), 2);
    second.with(|m| {
        assert_eq!(m.layers().len(), 1);
        assert_eq!(m.controls().len(), 1);
    });

    mount.unmount().unwrap();
    assert_eq!(attached_count(), 0);
}

#[test]
fn test_config_matches_hand_written_tree() {
    reset_registry();
    let by_hand = MapJournal::new();
    let from_config = MapJournal::new();

    let mount_a = mount(
        &by_hand,
        Box::new(|ctx| {
            vec![
                layers(|| {
                    vec![
                        tile_layer(ctx, TileLayerProps::default()),
                        vector_layer(ctx, VectorLayerProps {
                            source: counties(),
                            z_index: Some(1.into()),
                            ..Default::default()
                        }),
                    ]
                }),
                controls(|| vec![full_screen_control(ctx, FullScreenProps::default())]),
            ]
        }),
    );

    let config = MapConfig::from_json(
        r#"{
            "center": [-94.9065, 38.9884],
            "zoom": 9,
            "layers": [
                { "type": "tile" },
                { "type": "vector", "source": { "url": "data/kansas-counties.geojson" }, "z_index": 1 }
            ],
            "controls": [{ "type": "full_screen" }]
        }"#,
    )
    .unwrap();
    let mount_b = mount_config(&config, Some(MemoryMap::factory(from_config.clone())), None).unwrap();

    let snapshot = |mount: &MapMount| {
        mount.map().unwrap().with(|m| {
            (
                m.view().clone(),
                m.layers().iter().map(|l| (l.kind().clone(), l.z_index())).collect::<Vec<_>>(),
                m.controls().iter().map(|c| c.kind().clone()).collect::<Vec<_>>(),
            )
        })
    };
    assert_eq!(snapshot(&mount_a), snapshot(&mount_b));
    assert_eq!(by_hand.attaches(), from_config.attaches());
}
