use std::cmp::min;

use log::debug;
use nalgebra::Vector2;

use crate::color::RGBA;

/// Rectangle of pixels rendered as one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Tile {
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Cover the screen with `tile_size` squares, row by row.
/// Tiles on the right and bottom edge are cut to fit.
pub fn split_into_tiles(resolution: Vector2<usize>, tile_size: usize) -> Vec<Tile> {
    let tile_size = tile_size.max(1);
    let mut tiles = vec![];
    for y in (0..resolution.y).step_by(tile_size) {
        for x in (0..resolution.x).step_by(tile_size) {
            tiles.push(Tile {
                x,
                y,
                width: min(tile_size, resolution.x - x),
                height: min(tile_size, resolution.y - y),
            });
        }
    }
    tiles
}

/// Write `color` into row-major `frame_buffer` of width `width`
pub fn fill_color(frame_buffer: &mut [RGBA], width: usize, x: usize, y: usize, color: RGBA) {
    frame_buffer[x + width * y] = color;
}

/// Evaluate every pixel on the calling thread
pub fn render_sequential<F>(resolution: Vector2<usize>, frame_buffer: &mut [RGBA], pixel: F)
where
    F: Fn(usize, usize) -> RGBA,
{
    for y in 0..resolution.y {
        for x in 0..resolution.x {
            fill_color(frame_buffer, resolution.x, x, y, pixel(x, y));
        }
    }
}

/// Evaluate pixels tile by tile on `threads` workers.
///
/// Workers pull tile indices from a queue and send back finished tiles,
/// the calling thread copies them into `frame_buffer`.
pub fn render_tiled<F>(
    resolution: Vector2<usize>,
    tile_size: usize,
    threads: usize,
    frame_buffer: &mut [RGBA],
    pixel: F,
) where
    F: Fn(usize, usize) -> RGBA + Sync,
{
    let tiles = split_into_tiles(resolution, tile_size);

    let threads = match threads {
        0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    };
    let threads = min(threads, tiles.len()).max(1);

    debug!("Rendering {} tiles on {} threads", tiles.len(), threads);

    let (task_sender, task_receiver) = crossbeam::channel::unbounded::<usize>();
    let (result_sender, result_receiver) = crossbeam::channel::unbounded::<(usize, Vec<RGBA>)>();

    for tile_id in 0..tiles.len() {
        // Receiver is alive, cannot fail
        let _ = task_sender.send(tile_id);
    }
    drop(task_sender);

    let tiles_ref = &tiles[..];
    let pixel_ref = &pixel;

    // Scope assures threads will be joined before exiting the scope
    let res = crossbeam::scope(|s| {
        for _ in 0..threads {
            let task_receiver = task_receiver.clone();
            let result_sender = result_sender.clone();
            s.spawn(move |_| {
                for tile_id in task_receiver.iter() {
                    let tile = tiles_ref[tile_id];
                    let mut pixels = Vec::with_capacity(tile.pixel_count());
                    for y in tile.y..tile.y + tile.height {
                        for x in tile.x..tile.x + tile.width {
                            pixels.push(pixel_ref(x, y));
                        }
                    }
                    if result_sender.send((tile_id, pixels)).is_err() {
                        break;
                    }
                }
            });
        }
        // Workers hold the remaining senders, iteration ends once all of them finish
        drop(result_sender);

        for (tile_id, pixels) in result_receiver.iter() {
            let tile = tiles_ref[tile_id];
            for (i, color) in pixels.into_iter().enumerate() {
                let x = tile.x + i % tile.width;
                let y = tile.y + i / tile.width;
                fill_color(frame_buffer, resolution.x, x, y, color);
            }
        }
    });

    if let Err(panic) = res {
        std::panic::resume_unwind(panic);
    }
}
