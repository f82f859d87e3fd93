use image::GenericImageView;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Convert a PNG into the ST7920 page-cell format at build time: one
/// big-endian 16-bit cell per 16-pixel page, logical row-major, MSB =
/// leftmost pixel. The driver can copy the cells into its page buffer as-is.
fn convert_image_to_cells(
    input_path: &str,
    output_path: &str,
    target_width: u32,
    target_height: u32,
    threshold: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", input_path);

    // Check if input file exists
    if !Path::new(input_path).exists() {
        println!(
            "cargo:warning=Image file '{}' not found, skipping conversion",
            input_path
        );
        // Create empty file so build doesn't fail
        let mut file = File::create(output_path)?;
        file.write_all(&[])?;
        return Ok(());
    }

    println!("cargo:warning=Converting image: {}", input_path);

    let img = image::open(input_path)?;
    println!(
        "cargo:warning=Original image size: {}x{}",
        img.width(),
        img.height()
    );

    // Calculate aspect-ratio-preserving dimensions
    let orig_ratio = img.width() as f32 / img.height() as f32;
    let target_ratio = target_width as f32 / target_height as f32;

    let (new_width, new_height) = if orig_ratio > target_ratio {
        // Image is wider than target - fit to width
        (target_width, (target_width as f32 / orig_ratio) as u32)
    } else {
        // Image is taller than target - fit to height
        ((target_height as f32 * orig_ratio) as u32, target_height)
    };

    let resized = img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3);
    let gray = resized.to_luma8();

    // One 16-bit cell per page of 16 horizontal pixels
    let pages_per_row = target_width / 16;
    let mut cells = vec![0u16; (pages_per_row * target_height) as usize];

    // Center the resized image on a dark background
    let offset_x = (target_width - new_width) / 2;
    let offset_y = (target_height - new_height) / 2;

    for y in 0..target_height {
        for x in 0..target_width {
            let img_x = x.checked_sub(offset_x);
            let img_y = y.checked_sub(offset_y);

            let brightness = match (img_x, img_y) {
                (Some(ix), Some(iy)) if ix < new_width && iy < new_height => {
                    gray.get_pixel(ix, iy)[0]
                }
                _ => 0,
            };

            // Bright source pixels become lit panel pixels
            if brightness >= threshold {
                let cell_index = (y * pages_per_row + x / 16) as usize;
                cells[cell_index] |= 1 << (15 - (x % 16));
            }
        }
    }

    println!(
        "cargo:warning=Image conversion complete. {} page cells",
        cells.len()
    );

    let mut file = File::create(output_path)?;
    for cell in cells {
        file.write_all(&cell.to_be_bytes())?;
    }

    println!("cargo:warning=Cell data saved to: {}", output_path);
    Ok(())
}

fn main() {
    embuild::espidf::sysenv::output();

    let out_dir = env::var("OUT_DIR").unwrap();

    // Convert logo.png into the splash blob at build time
    // Display dimensions: 128x64 logical pixels
    let splash_output = format!("{}/splash.bin", out_dir);

    if let Err(e) = convert_image_to_cells(
        "logo.png",
        &splash_output,
        128, // width
        64,  // height
        128, // threshold (0-255, 128 = middle gray)
    ) {
        println!("cargo:warning=Failed to convert logo.png: {}", e);
    }

    println!("cargo:rerun-if-changed=logo.png");
}
