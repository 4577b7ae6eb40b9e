//! Bevy application setup

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::{prelude::MeshPickingPlugin, DefaultPickingPlugins};

use vitrine_core::{Catalog, Product};
use vitrine_scene::{InteractionPlugin, ModelsPlugin, PhysicsPlugin, ScenePlugin};

use crate::ui::UiPlugin;

/// Products available for preview
#[derive(Debug, Clone, Resource, Default)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

/// Run the Bevy application
pub fn run(catalog: Catalog) {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.94, 0.94, 0.94))) // Neutral backdrop
        .insert_resource(ProductCatalog {
            products: catalog.products,
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Vitrine - Product Preview".to_string(),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    // Catalogs reference models without .meta sidecars
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                }),
        )
        // DefaultPickingPlugins provides core picking; MeshPickingPlugin adds
        // 3D mesh raycasting. Both must be added BEFORE EguiPlugin so it can
        // detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .add_plugins(ScenePlugin)
        .add_plugins(ModelsPlugin)
        .add_plugins(PhysicsPlugin)
        .add_plugins(InteractionPlugin)
        .add_plugins(UiPlugin)
        .run();
}
