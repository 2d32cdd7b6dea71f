//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use tile_grid::{CoordTransform, Extent, TileRequest};
use utfgrid_core::core::geom::CartesianProvider;
use utfgrid_core::datasource::GeojsonSource;
use utfgrid_core::{Grid, Renderer};

const TRIANGLES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {"NAME_FORMA": "Upper", "POP_EST": 10},
      "geometry": {"type": "Polygon", "coordinates": [[[-140, 90], [-50, 90], [-140, 0], [-140, 90]]]}
    },
    {
      "type": "Feature",
      "properties": {"NAME_FORMA": "Lower", "POP_EST": 20.5},
      "geometry": {"type": "Polygon", "coordinates": [[[-50, 90], [-50, 0], [-140, 0], [-50, 90]]]}
    }
  ]
}"#;

#[test]
fn render_diagonal_split() {
    let request = TileRequest::new(
        256,
        256,
        Extent {
            minx: -140.0,
            miny: 0.0,
            maxx: -50.0,
            maxy: 90.0,
        },
    );
    let ctrans = CoordTransform::new(&request).unwrap();
    let mut source = GeojsonSource::parse(TRIANGLES, "triangles").unwrap();
    let mut grid = Grid::default();
    let fields = vec!["NAME_FORMA".to_string(), "POP_EST".to_string()];

    let matches = Renderer::new(&mut grid, &ctrans, &CartesianProvider)
        .apply(&mut source, &fields)
        .unwrap();
    assert_eq!(matches, 64 * 64);

    let utfgrid = grid.encode().unwrap();
    assert_eq!(utfgrid.grid.len(), 64);
    assert_eq!(utfgrid.keys, vec!["0", "1"]);
    // upper left triangle covers the anti-diagonal cells
    assert!(utfgrid.grid[0].starts_with("                "));
    assert!(utfgrid.grid[63].ends_with("!!!!!!!!"));
    for (y, row) in utfgrid.grid.iter().enumerate() {
        assert_eq!(row.chars().count(), 64);
        assert_eq!(row.chars().nth(63 - y), Some(' '));
    }
    assert_eq!(
        serde_json::to_value(&utfgrid.data).unwrap(),
        serde_json::json!({
            "0": {"NAME_FORMA": "Upper", "POP_EST": 10},
            "1": {"NAME_FORMA": "Lower", "POP_EST": 20.5}
        })
    );
}
