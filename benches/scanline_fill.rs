use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{IVec2, Vec2};
use gui_raster::core::{BitmapFont, Command, Context, Image, Interpreter};
use gui_raster::demo::demo_frame;
use gui_raster::math::{fill_spans, Color, GuiColor, IRect, MAX_POLYGON_POINTS};
use gui_raster::traits::Font;
use std::f32::consts::TAU;
use std::rc::Rc;

/// Star polygon with alternating outer and inner radii
fn star(points: usize, radius: f32) -> Vec<Vec2> {
    (0..points)
        .map(|i| {
            let angle = i as f32 / points as f32 * TAU;
            let r = if i % 2 == 0 { radius } else { radius * 0.45 };
            Vec2::new(radius + r * angle.cos(), radius + r * angle.sin())
        })
        .collect()
}

/// Benchmark: span generation alone, by vertex count
fn bench_fill_spans(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_spans");
    let window = IRect::new(0, 0, 256, 256);

    for count in [4, 16, MAX_POLYGON_POINTS].iter() {
        let points: Vec<IVec2> = star(*count, 128.0)
            .into_iter()
            .map(|p| p.as_ivec2())
            .collect();

        group.bench_with_input(BenchmarkId::new("star", count), count, |b, _| {
            b.iter(|| {
                let mut covered = 0i32;
                fill_spans(black_box(&points), window, |x0, x1, _| covered += x1 - x0);
                black_box(covered)
            })
        });
    }

    group.finish();
}

/// Benchmark: filled polygon through the interpreter onto an image
fn bench_polygon_render(c: &mut Criterion) {
    let font: Rc<dyn Font> = Rc::new(BitmapFont::new());
    let mut ctx = Context::new(&font).unwrap();
    let mut image = Image::new(256, 256);
    let interpreter = Interpreter::default();
    let points = star(MAX_POLYGON_POINTS, 128.0);

    c.bench_function("polygon_render_64", |b| {
        b.iter(|| {
            ctx.push(Command::PolygonFilled {
                points: points.clone(),
                color: GuiColor::rgb(90, 120, 200),
            });
            interpreter.render(&mut image, &mut ctx);
            black_box(image.get_pixel(128, 128))
        })
    });
}

/// Benchmark: one full demo frame
fn bench_demo_frame(c: &mut Criterion) {
    let font: Rc<dyn Font> = Rc::new(BitmapFont::new());
    let mut ctx = Context::new(&font).unwrap();
    let mut image = Image::new_color(400, 300, Color::RAYWHITE);
    let interpreter = Interpreter::default();

    c.bench_function("demo_frame_400x300", |b| {
        b.iter(|| {
            image.clear(Color::RAYWHITE);
            demo_frame(&mut ctx, 400.0, 300.0);
            interpreter.render(&mut image, &mut ctx);
            black_box(image.pixels().len())
        })
    });
}

criterion_group!(benches, bench_fill_spans, bench_polygon_render, bench_demo_frame);
criterion_main!(benches);
