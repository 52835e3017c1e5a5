/// Record a command buffer with `function` and submit it on its own.
pub fn submit(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    descriptor: &wgpu::CommandEncoderDescriptor,
    function: impl FnOnce(&mut wgpu::CommandEncoder),
) -> wgpu::SubmissionIndex {
    let mut command_encoder = device.create_command_encoder(descriptor);
    function(&mut command_encoder);
    queue.submit([command_encoder.finish()])
}
