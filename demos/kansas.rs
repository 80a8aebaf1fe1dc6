//! Kansas Example - A basemap, two vector overlays and a full-screen control
//!
//! This example walks a map tree through its lifecycle:
//! - Mounting a container with a tile layer, two vector layers and a control
//! - Zooming without rebuilding the instance
//! - Hiding and re-showing a layer, and restacking it in place
//! - Unmounting everything
//!
//! Every call the binders make against the map is journaled and printed.
//!
//! Run with: RUST_LOG=spark_map=debug cargo run --example kansas

use serde_json::json;
use spark_signals::signal;
use spark_map::{
    FullScreenProps, MapJournal, MapProps, MemoryMap, Rgba, Style, Surface, TileLayerProps,
    VectorLayerProps, VectorSource, controls, full_screen_control, layers, map_container,
    tile_layer, vector_layer,
};

fn main() -> Result<(), spark_map::MapError> {
    tracing_subscriber::fmt::init();

    println!("=== spark-map Kansas Example ===\n");

    let surface = Surface::terminal().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "no terminal; using a fixed surface");
        Surface::new("offscreen", 120, 40)
    });

    let journal = MapJournal::new();
    let zoom = signal(9.0);
    let counties_visible = signal(true);
    let counties_z = signal(1);

    let lawrence = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-95.2353, 38.9717] },
            "properties": { "name": "Lawrence" }
        }]
    });

    let visible_for_tree = counties_visible.clone();
    let z_for_tree = counties_z.clone();

    let mount = map_container(MapProps {
        center: (-94.9065, 38.9884).into(),
        zoom: zoom.clone().into(),
        target: Some(surface),
        factory: Some(MemoryMap::factory(journal.clone())),
        children: Some(Box::new(move |ctx| {
            vec![
                layers(|| {
                    vec![
                        tile_layer(ctx, TileLayerProps::default()),
                        vector_layer(ctx, VectorLayerProps {
                            source: VectorSource::Url("data/kansas-counties.geojson".into()),
                            style: Some(
                                Style::fill(Rgba::new(0x31, 0x9f, 0xd3, 0x40))
                                    .with_stroke(Rgba::rgb(0x31, 0x9f, 0xd3), 2.0),
                            ),
                            z_index: Some(z_for_tree.into()),
                            visible: Some(visible_for_tree.into()),
                        }),
                        vector_layer(ctx, VectorLayerProps {
                            source: VectorSource::GeoJson(lawrence),
                            z_index: Some(2.into()),
                            ..Default::default()
                        }),
                    ]
                }),
                controls(|| vec![full_screen_control(ctx, FullScreenProps::default())]),
            ]
        })),
        ..Default::default()
    })?;

    if let Some(map) = mount.map() {
        map.with(|m| {
            println!("Mounted {} at {} zoom {}", m.id(), m.view().center(), m.view().zoom());
            for layer in m.layers() {
                println!("  {} z={}", layer.id(), layer.z_index());
            }
            println!("  render order: {:?}", m.render_order());
        });
    }

    println!("\n--- Zoom in ---\n");
    zoom.set(11.0);

    println!("--- Hide counties, restack, show again ---\n");
    counties_visible.set(false);
    counties_z.set(3);
    counties_visible.set(true);

    if let Some(map) = mount.map() {
        map.with(|m| {
            for layer in m.layers() {
                println!("  {} z={}", layer.id(), layer.z_index());
            }
            println!("  render order: {:?}", m.render_order());
        });
    }

    println!("\n--- Unmount ---\n");
    mount.unmount()?;

    println!("Journal:");
    for event in journal.events() {
        println!("  {event:?}");
    }
    println!(
        "\n{} attaches, {} detaches, {} map(s) created",
        journal.attaches(),
        journal.detaches(),
        journal.maps_created()
    );

    Ok(())
}
