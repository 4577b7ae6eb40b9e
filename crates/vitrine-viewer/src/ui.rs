//! Product panel overlay using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use vitrine_scene::{LoadStatus, SelectedProduct};

use crate::app::ProductCatalog;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Runs in EguiPrimaryContextPass for proper input handling
        // (bevy_egui 0.38+)
        app.add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    catalog: Res<ProductCatalog>,
    mut selected: ResMut<SelectedProduct>,
    status: Res<LoadStatus>,
) {
    // Get the egui context - early return if not available
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::SidePanel::left("products_panel")
        .default_width(250.0)
        .show(ctx, |ui| {
            ui.heading("Products");
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for product in &catalog.products {
                    let is_selected = selected
                        .0
                        .as_ref()
                        .is_some_and(|current| current.id == product.id);

                    if ui.selectable_label(is_selected, &product.name).clicked()
                        && !is_selected
                    {
                        selected.0 = Some(product.clone());
                    }

                    if is_selected {
                        if let Some(description) = &product.description {
                            ui.label(egui::RichText::new(description).weak());
                        }
                    }
                }

                if catalog.products.is_empty() {
                    ui.label("Catalog is empty");
                }
            });

            ui.separator();

            if selected.0.is_some() && ui.button("Clear selection").clicked() {
                selected.0 = None;
            }

            match &*status {
                LoadStatus::Idle => {}
                LoadStatus::Loading { source } => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Loading {source}"));
                    });
                }
                LoadStatus::Ready { .. } => {
                    ui.label("Drag to rotate");
                }
                LoadStatus::Failed { source, reason } => {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("Failed to load {source}: {reason}"),
                    );
                }
            }
        });
}
