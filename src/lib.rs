#![warn(missing_docs)]
/*!
Data types and functions for building Skew-T/Log-P diagrams of atmospheric soundings taken from
gridded weather model output.

The crate does not draw anything itself. A [`Sounding`] is loaded from a model through the
[`SoundingProvider`] trait, then one of the render functions lays out the diagram for a
[`PlotGeometry`] and returns a [`RenderScene`], a list of filled rectangles, lines, polylines and
text in paint order that any 2D graphics backend can draw.

```rust
use sounding_skewt::{doctest::make_test_sounding, render_annotated, PlotGeometry, SceneLayer};

let snd = make_test_sounding();
let scene = render_annotated(&snd, &PlotGeometry::export());

assert!(scene.layer(SceneLayer::TemperatureTrace).count() == 1);
assert!(scene.layer(SceneLayer::Annotation).count() > 0);
```

The thermodynamic formulas used to draw the background and to calculate the stability indexes
are in the [`thermo`] module and work on plain `f64` values in SI units.
*/

//
// API
//
pub use crate::{
    analysis::Analysis,
    error::{Result, SkewTError},
    geometry::{PlotGeometry, PRES_BASE, PRES_MAX, PRES_MIN, TEMP_MAX, TEMP_MIN},
    indexes::{k_index, lcl, sweat, total_totals},
    interpolation::linear_interpolate_sounding,
    keys::ProfileIndex,
    layout::{render, render_annotated, render_blank},
    provider::{build_sounding, GridPoint, Humidity, ProviderColumn, SoundingProvider},
    scene::{
        Color, Font, FontWeight, Point, Primitive, RenderScene, SceneElement, SceneLayer, Stroke,
        Text, TextAlign, TextBaseline,
    },
    sounding::{Level, Sounding, StationInfo},
    thermo::Lcl,
};

#[doc(hidden)]
pub use crate::sounding::doctest;

pub mod thermo;
pub mod utility;

//
// Internal use only
//

// Modules
mod analysis;
mod error;
mod geometry;
mod indexes;
mod interpolation;
mod keys;
mod layout;
mod provider;
mod scene;
mod sounding;
