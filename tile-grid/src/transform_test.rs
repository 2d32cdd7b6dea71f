//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::{CoordTransform, Extent, InvalidExtent, TileRequest};

fn americas_tile() -> TileRequest {
    TileRequest::new(
        256,
        256,
        Extent {
            minx: -140.0,
            miny: 0.0,
            maxx: -50.0,
            maxy: 90.0,
        },
    )
}

fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
    const EPSILON: f64 = 1e-9;
    assert!(
        (actual.0 - expected.0).abs() < EPSILON && (actual.1 - expected.1).abs() < EPSILON,
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn test_extent() {
    let extent = americas_tile().extent;
    assert_eq!(extent.width(), 90.0);
    assert_eq!(extent.height(), 90.0);
    assert_eq!(extent.to_string(), "Extent(-140,0,-50,90)");
    assert_eq!(extent.validate(), Ok(()));
}

#[test]
fn test_invalid_extent() {
    let flat = Extent {
        minx: 0.0,
        miny: 5.0,
        maxx: 10.0,
        maxy: 5.0,
    };
    let req = TileRequest::new(256, 256, flat.clone());
    assert_eq!(
        CoordTransform::new(&req).err(),
        Some(InvalidExtent::Empty(flat))
    );

    let flipped = Extent {
        minx: 10.0,
        miny: 0.0,
        maxx: 0.0,
        maxy: 10.0,
    };
    let req = TileRequest::new(256, 256, flipped);
    assert!(CoordTransform::new(&req).is_err());

    let nan = Extent {
        minx: std::f64::NAN,
        miny: 0.0,
        maxx: 10.0,
        maxy: 10.0,
    };
    let req = TileRequest::new(256, 256, nan);
    assert!(matches!(
        CoordTransform::new(&req),
        Err(InvalidExtent::NotFinite(_))
    ));

    let mut req = americas_tile();
    req.width = 0;
    assert_eq!(
        CoordTransform::new(&req).err(),
        Some(InvalidExtent::PixelSize(0, 256))
    );
}

#[test]
fn test_forward_backward() {
    let ctrans = CoordTransform::new(&americas_tile()).unwrap();
    assert_eq!(ctrans.pixel_size(), (256, 256));
    // top left corner
    assert_close(ctrans.forward(-140.0, 90.0), (0.0, 0.0));
    assert_close(ctrans.backward(0.0, 0.0), (-140.0, 90.0));
    // pixel y grows southwards
    assert_close(ctrans.forward(-50.0, 0.0), (256.0, 256.0));
    assert_close(ctrans.backward(128.0, 128.0), (-95.0, 45.0));
    assert_close(ctrans.backward(256.0, 256.0), (-50.0, 0.0));
}

#[test]
fn test_offset() {
    let ctrans = CoordTransform::with_offset(&americas_tile(), 10.0, -20.0).unwrap();
    assert_close(ctrans.forward(-140.0, 90.0), (-10.0, 20.0));
    assert_close(ctrans.backward(-10.0, 20.0), (-140.0, 90.0));
}

#[test]
fn test_inverse_law() {
    let requests = vec![
        americas_tile(),
        TileRequest::new(
            512,
            300,
            Extent {
                minx: 2420000.0,
                miny: 1030000.0,
                maxx: 2900000.0,
                maxy: 1350000.0,
            },
        ),
        TileRequest::new(
            7,
            13,
            Extent {
                minx: -0.001,
                miny: 47.3,
                maxx: 0.002,
                maxy: 47.31,
            },
        ),
    ];
    for req in &requests {
        let ctrans = CoordTransform::with_offset(req, 3.5, 1.25).unwrap();
        for px in &[0.0, 1.0, 4.0, 100.5, req.width as f64] {
            for py in &[0.0, 3.0, 63.75, req.height as f64] {
                let (x, y) = ctrans.backward(*px, *py);
                let back = ctrans.forward(x, y);
                assert!((back.0 - px).abs() < 1e-6, "{:?} {} {}", back, px, py);
                assert!((back.1 - py).abs() < 1e-6, "{:?} {} {}", back, px, py);
            }
        }
        let e = &req.extent;
        for (x, y) in &[(e.minx, e.maxy), (e.maxx, e.miny), (e.minx + e.width() / 3.0, e.miny)] {
            let (px, py) = ctrans.forward(*x, *y);
            let geo = ctrans.backward(px, py);
            assert!((geo.0 - x).abs() < 1e-6 * e.width().max(1.0));
            assert!((geo.1 - y).abs() < 1e-6 * e.height().max(1.0));
        }
    }
}
