use image::imageops::FilterType;

use crate::error::{AppError, AppResult};
use crate::models::PaletteColor;

/// Number of palette entries extracted when the caller does not specify one
pub const DEFAULT_PALETTE_SIZE: usize = 5;

/// Images are downsampled to this square edge before clustering
const WORK_SIZE: u32 = 100;

const MAX_ITERATIONS: usize = 20;

/// Extracts the k dominant colors of an image.
///
/// The image is resized to a fixed working resolution and its pixels are
/// clustered with k-means. Returns exactly k entries, each a hex color with
/// its share of pixels, sorted by share descending; shares sum to 1.
///
/// Pure function of (bytes, k): centroids are seeded from evenly spaced
/// pixels rather than at random, so repeated calls yield identical output.
pub fn extract_palette(image_bytes: &[u8], k: usize) -> AppResult<Vec<PaletteColor>> {
    if k == 0 {
        return Err(AppError::InvalidInput(
            "Palette size must be at least 1".to_string(),
        ));
    }

    let img = image::load_from_memory(image_bytes)
        .map_err(|e| AppError::Preprocessing(format!("cannot decode image: {}", e)))?;

    let rgb = img
        .resize_exact(WORK_SIZE, WORK_SIZE, FilterType::Nearest)
        .to_rgb8();

    let pixels: Vec<[f32; 3]> = rgb
        .pixels()
        .map(|p| [p.0[0] as f32, p.0[1] as f32, p.0[2] as f32])
        .collect();

    if k > pixels.len() {
        return Err(AppError::InvalidInput(format!(
            "Palette size {} exceeds pixel count {}",
            k,
            pixels.len()
        )));
    }

    let (centroids, counts) = kmeans(&pixels, k);

    let total: usize = counts.iter().sum();
    let mut palette: Vec<PaletteColor> = centroids
        .iter()
        .zip(counts.iter())
        .map(|(centroid, count)| PaletteColor {
            color: to_hex(centroid),
            percentage: *count as f32 / total as f32,
        })
        .collect();

    palette.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(palette)
}

/// Lloyd's algorithm over RGB points with deterministic seeding.
///
/// Returns the final centroids and the number of pixels assigned to each.
/// Empty clusters are reseeded with the pixel farthest from its centroid so
/// the result always carries exactly k clusters.
fn kmeans(pixels: &[[f32; 3]], k: usize) -> (Vec<[f32; 3]>, Vec<usize>) {
    // Evenly spaced samples as initial centroids
    let mut centroids: Vec<[f32; 3]> = (0..k).map(|i| pixels[i * pixels.len() / k]).collect();

    let mut assignments = vec![0usize; pixels.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;

        for (pixel_idx, pixel) in pixels.iter().enumerate() {
            let nearest = nearest_centroid(pixel, &centroids);
            if assignments[pixel_idx] != nearest {
                assignments[pixel_idx] = nearest;
                changed = true;
            }
        }

        // Recompute each centroid as the mean of its assigned pixels
        let mut sums = vec![[0.0f32; 3]; k];
        let mut counts = vec![0usize; k];
        for (pixel, &cluster) in pixels.iter().zip(assignments.iter()) {
            for channel in 0..3 {
                sums[cluster][channel] += pixel[channel];
            }
            counts[cluster] += 1;
        }

        for cluster in 0..k {
            if counts[cluster] == 0 {
                // Reseed a starved cluster with the worst-fitting pixel and
                // run at least one more assignment pass over it
                if let Some((idx, _)) = pixels
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i, distance_sq(p, &centroids[assignments[i]])))
                    .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                {
                    centroids[cluster] = pixels[idx];
                    changed = true;
                }
            } else {
                for channel in 0..3 {
                    centroids[cluster][channel] = sums[cluster][channel] / counts[cluster] as f32;
                }
            }
        }

        if !changed {
            break;
        }
    }

    let mut counts = vec![0usize; k];
    for &cluster in &assignments {
        counts[cluster] += 1;
    }

    (centroids, counts)
}

fn nearest_centroid(pixel: &[f32; 3], centroids: &[[f32; 3]]) -> usize {
    let mut nearest = 0;
    let mut nearest_dist = f32::MAX;
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = distance_sq(pixel, centroid);
        if dist < nearest_dist {
            nearest_dist = dist;
            nearest = idx;
        }
    }
    nearest
}

fn distance_sq(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}

fn to_hex(rgb: &[f32; 3]) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        rgb[0].round().clamp(0.0, 255.0) as u8,
        rgb[1].round().clamp(0.0, 255.0) as u8,
        rgb[2].round().clamp(0.0, 255.0) as u8
    )
}
